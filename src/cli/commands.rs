//! CLI subcommand definitions
//!
//! One subcommand per report granularity; period selection flags follow
//! each report's natural calendar unit.

use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum Commands {
    /// Daily cost breakdown over a date range (default)
    Daily {
        /// Start date, inclusive (YYYYMMDD or YYYY-MM-DD); default 30 days ago
        #[arg(short, long)]
        since: Option<String>,
        /// End date, exclusive (YYYYMMDD or YYYY-MM-DD); default today
        #[arg(short, long)]
        until: Option<String>,
    },
    /// Cost report for one calendar month
    Monthly {
        /// Month number 1-12 (default: previous month)
        #[arg(short, long)]
        month: Option<u32>,
        /// Year YYYY (default: year of the previous month)
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Cost report for one calendar quarter
    Quarterly {
        /// Quarter number 1-4 (default: current quarter)
        #[arg(short, long)]
        quarter: Option<u32>,
        /// Year YYYY (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
        /// Granularity of the breakdown rows
        #[arg(long, value_enum, default_value = "monthly")]
        granularity: QuarterBreakdown,
    },
    /// Cost report for one calendar year
    Yearly {
        /// Year YYYY (default: previous year)
        #[arg(short, long)]
        year: Option<i32>,
        /// Granularity of the breakdown rows; monthly also gets a
        /// quarterly comparison table
        #[arg(long, value_enum, default_value = "monthly")]
        granularity: YearBreakdown,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Daily {
            since: None,
            until: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum QuarterBreakdown {
    Daily,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum YearBreakdown {
    Monthly,
    Quarterly,
}
