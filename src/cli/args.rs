//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode, ConfigGroupBy};
use crate::core::Dimension;

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum GroupBy {
    /// Group costs by service name (default)
    #[default]
    Service,
    /// Group costs by linked account
    Account,
    /// Group costs by region
    Region,
    /// Group costs by a tag key (requires --tag-key)
    Tag,
}

impl From<GroupBy> for Dimension {
    fn from(group_by: GroupBy) -> Self {
        match group_by {
            GroupBy::Service => Dimension::Service,
            GroupBy::Account => Dimension::Account,
            GroupBy::Region => Dimension::Region,
            GroupBy::Tag => Dimension::Tag,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "costview")]
#[command(about = "Multi-granularity AWS cost reports from Cost Explorer data", version)]
#[command(after_help = "Feed it saved responses from:\n  \
    aws ce get-cost-and-usage --time-period Start=...,End=... \\\n    \
    --granularity MONTHLY --metrics UnblendedCost UsageQuantity \\\n    \
    --group-by Type=DIMENSION,Key=SERVICE > costs.json\n  \
    costview yearly --year 2024 --input costs.json")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Saved Cost Explorer response JSON (repeatable; glob patterns; "-" or
    /// nothing reads stdin)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub(crate) input: Vec<String>,

    /// Dimension to group costs by
    #[arg(long, global = true, value_enum, default_value = "service")]
    pub(crate) group_by: GroupBy,

    /// Tag key to group by (required with --group-by=tag)
    #[arg(long, global = true, value_name = "KEY")]
    pub(crate) tag_key: Option<String>,

    /// Number of top cost drivers to highlight (default varies by report)
    #[arg(long, global = true, value_name = "N")]
    pub(crate) top_n: Option<usize>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Output as CSV
    #[arg(long, global = true)]
    pub(crate) csv: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // Only apply config values if CLI didn't explicitly set them; for
        // enums at their default we cannot tell, so the default yields.
        if self.group_by == GroupBy::Service
            && let Some(group_by) = config.group_by
        {
            self.group_by = match group_by {
                ConfigGroupBy::Service => GroupBy::Service,
                ConfigGroupBy::Account => GroupBy::Account,
                ConfigGroupBy::Region => GroupBy::Region,
                ConfigGroupBy::Tag => GroupBy::Tag,
            };
        }
        if self.tag_key.is_none() {
            self.tag_key = config.tag_key.clone();
        }
        if self.top_n.is_none() {
            self.top_n = config.top_n;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if self.color == ColorMode::Auto
            && let Some(color) = config.color
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }
        self
    }

    pub(crate) fn dimension(&self) -> Dimension {
        self.group_by.into()
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}
