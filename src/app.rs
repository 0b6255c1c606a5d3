//! Report orchestration: resolve the request, load records, run the
//! pipeline, hand the assembled report to a renderer.

use chrono::{Datelike, Local, NaiveDate};

use crate::cli::{Cli, Commands, QuarterBreakdown, YearBreakdown};
use crate::config::Config;
use crate::core::{
    DateRange, Dimension, Granularity, PeriodLabeler, build_pivot, rollup_records, summarize,
};
use crate::error::ReportError;
use crate::report::{Report, ReportMeta, TableOptions, print_report, report_csv, report_json};
use crate::source::{CostQuery, FetchGranularity, JsonFileSource, load_records};
use crate::utils::date::{
    last_n_days, month_range, parse_date, previous_month, quarter_of, quarter_range, year_range,
};

/// Everything a single report run needs, resolved from the command line
/// and today's date before any data is touched.
#[derive(Debug)]
struct ReportPlan {
    title: String,
    breakdown_title: String,
    summary_title: String,
    range: DateRange,
    fetch: FetchGranularity,
    /// Granularity of the breakdown pivot rows
    breakdown: Granularity,
    /// Requested report granularity, passed through as metadata
    report_granularity: Granularity,
    reference_year: i32,
    /// Aggregate records to the breakdown granularity before pivoting
    rollup_first: bool,
    /// Attach the quarter-over-quarter comparison table
    comparison: bool,
    default_top_n: usize,
}

fn plan_report(command: &Commands, today: NaiveDate) -> Result<ReportPlan, ReportError> {
    match command {
        Commands::Daily { since, until } => {
            let range = match (since, until) {
                (None, None) => last_n_days(today, 30),
                (since, until) => {
                    let end = match until {
                        Some(s) => parse_date(s)?,
                        None => today,
                    };
                    let start = match since {
                        Some(s) => parse_date(s)?,
                        None => end - chrono::Duration::days(30),
                    };
                    DateRange { start, end }
                }
            };
            Ok(ReportPlan {
                title: format!("AWS Daily Cost Report ({} to {})", range.start, range.end),
                breakdown_title: "Daily Breakdown".to_string(),
                summary_title: "Cost Summary".to_string(),
                range,
                fetch: FetchGranularity::Daily,
                breakdown: Granularity::Day,
                report_granularity: Granularity::Day,
                reference_year: range.start.year(),
                rollup_first: false,
                comparison: false,
                default_top_n: 10,
            })
        }
        Commands::Monthly { month, year } => {
            let (year, month) = match (month, year) {
                (None, None) => previous_month(today),
                (Some(m), None) => (today.year(), *m),
                (None, Some(y)) => (*y, previous_month(today).1),
                (Some(m), Some(y)) => (*y, *m),
            };
            let range = month_range(year, month)?;
            let month_name = range.start.format("%B").to_string();
            Ok(ReportPlan {
                title: format!("AWS Monthly Cost Report - {month_name} {year}"),
                breakdown_title: "Daily Breakdown".to_string(),
                summary_title: "Monthly Summary".to_string(),
                range,
                fetch: FetchGranularity::Daily,
                breakdown: Granularity::Day,
                report_granularity: Granularity::Month,
                reference_year: year,
                rollup_first: false,
                comparison: false,
                default_top_n: 10,
            })
        }
        Commands::Quarterly {
            quarter,
            year,
            granularity,
        } => {
            let year = year.unwrap_or_else(|| today.year());
            let quarter = quarter.unwrap_or_else(|| quarter_of(today));
            let range = quarter_range(year, quarter)?;
            let (fetch, breakdown, breakdown_title) = match granularity {
                QuarterBreakdown::Daily => {
                    (FetchGranularity::Daily, Granularity::Day, "Daily Breakdown")
                }
                QuarterBreakdown::Monthly => (
                    FetchGranularity::Monthly,
                    Granularity::Month,
                    "Monthly Breakdown",
                ),
            };
            Ok(ReportPlan {
                title: format!("AWS Q{quarter} {year} Cost Report"),
                breakdown_title: breakdown_title.to_string(),
                summary_title: "Quarterly Summary".to_string(),
                range,
                fetch,
                breakdown,
                report_granularity: Granularity::Quarter,
                reference_year: year,
                rollup_first: false,
                comparison: false,
                default_top_n: 5,
            })
        }
        Commands::Yearly { year, granularity } => {
            let year = year.unwrap_or_else(|| today.year() - 1);
            let range = year_range(year);
            let (breakdown, breakdown_title, rollup_first, comparison) = match granularity {
                YearBreakdown::Monthly => (Granularity::Month, "Monthly Breakdown", false, true),
                YearBreakdown::Quarterly => {
                    (Granularity::Quarter, "Quarterly Breakdown", true, false)
                }
            };
            Ok(ReportPlan {
                title: format!("AWS {year} Cost Report"),
                breakdown_title: breakdown_title.to_string(),
                summary_title: "Yearly Summary".to_string(),
                range,
                fetch: FetchGranularity::Monthly,
                breakdown,
                report_granularity: Granularity::Year,
                reference_year: year,
                rollup_first,
                comparison,
                default_top_n: 10,
            })
        }
    }
}

pub(crate) fn run(cli: Cli) -> Result<(), ReportError> {
    let quiet = cli.json || cli.csv;
    let config = if quiet {
        Config::load_quiet()
    } else {
        Config::load()
    };
    let cli = cli.with_config(&config);

    let dimension = cli.dimension();
    if dimension == Dimension::Tag && cli.tag_key.is_none() {
        return Err(ReportError::TagKeyRequired);
    }

    let today = Local::now().date_naive();
    let command = cli.command.clone().unwrap_or_default();
    let plan = plan_report(&command, today)?;

    let source = JsonFileSource::new(cli.input.clone());
    let query = CostQuery {
        range: plan.range,
        granularity: plan.fetch,
        dimension,
        tag_key: cli.tag_key.clone(),
    };
    if !quiet {
        let grouped_by = match &query.tag_key {
            Some(key) => format!("tag \"{key}\""),
            None => query.dimension.column_name().to_lowercase(),
        };
        eprintln!(
            "Loading {} cost data for {} to {}, grouped by {grouped_by}...",
            query.granularity.noun(),
            query.range.start,
            query.range.end
        );
    }
    let records = load_records(&source, &query)?;

    let labeler = PeriodLabeler::new(plan.breakdown, plan.reference_year);
    let records = if plan.rollup_first {
        rollup_records(&records, &labeler, dimension)
    } else {
        records
    };

    let breakdown = build_pivot(&records, &labeler, plan.breakdown_title, dimension);
    let comparison = if plan.comparison {
        let quarter_labeler = PeriodLabeler::new(Granularity::Quarter, plan.reference_year);
        Some(build_pivot(
            &records,
            &quarter_labeler,
            "Quarterly Comparison",
            dimension,
        ))
    } else {
        None
    };
    let summary = summarize(&records);
    let currency = records.first().map(|r| r.currency.clone());

    let report = Report {
        meta: ReportMeta {
            title: plan.title,
            summary_title: plan.summary_title,
            granularity: plan.report_granularity,
            dimension,
            range: plan.range,
            generated_at: Local::now(),
            currency,
        },
        breakdown,
        comparison,
        summary,
        top_n: cli.top_n.unwrap_or(plan.default_top_n),
    };

    if cli.json {
        println!("{}", report_json(&report));
    } else if cli.csv {
        print!("{}", report_csv(&report));
    } else if records.is_empty() {
        println!("No cost data found for the requested period.");
    } else {
        print_report(
            &report,
            TableOptions {
                use_color: cli.use_color(),
            },
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn daily_plan_defaults_to_last_30_days() {
        let plan = plan_report(&Commands::default(), d(2024, 7, 15)).unwrap();
        assert_eq!(plan.range.start, d(2024, 6, 15));
        assert_eq!(plan.range.end, d(2024, 7, 15));
        assert_eq!(plan.breakdown, Granularity::Day);
        assert_eq!(plan.default_top_n, 10);
    }

    #[test]
    fn daily_plan_derives_start_from_explicit_until() {
        let command = Commands::Daily {
            since: None,
            until: Some("2024-03-31".to_string()),
        };
        let plan = plan_report(&command, d(2024, 7, 15)).unwrap();
        assert_eq!(plan.range.end, d(2024, 3, 31));
        assert_eq!(plan.range.start, d(2024, 3, 1));
    }

    #[test]
    fn monthly_plan_defaults_to_previous_month() {
        let command = Commands::Monthly {
            month: None,
            year: None,
        };
        let plan = plan_report(&command, d(2025, 1, 10)).unwrap();
        assert_eq!(plan.range.start, d(2024, 12, 1));
        assert_eq!(plan.range.end, d(2025, 1, 1));
        assert_eq!(plan.title, "AWS Monthly Cost Report - December 2024");
    }

    #[test]
    fn monthly_plan_rejects_bad_month() {
        let command = Commands::Monthly {
            month: Some(13),
            year: Some(2024),
        };
        assert!(matches!(
            plan_report(&command, d(2024, 7, 15)).unwrap_err(),
            ReportError::InvalidMonth(13)
        ));
    }

    #[test]
    fn quarterly_plan_defaults_to_current_quarter() {
        let command = Commands::Quarterly {
            quarter: None,
            year: None,
            granularity: QuarterBreakdown::Monthly,
        };
        let plan = plan_report(&command, d(2024, 8, 7)).unwrap();
        assert_eq!(plan.title, "AWS Q3 2024 Cost Report");
        assert_eq!(plan.range.start, d(2024, 7, 1));
        assert_eq!(plan.range.end, d(2024, 10, 1));
        assert_eq!(plan.default_top_n, 5);
        assert_eq!(plan.breakdown, Granularity::Month);
    }

    #[test]
    fn quarterly_plan_rejects_bad_quarter() {
        let command = Commands::Quarterly {
            quarter: Some(5),
            year: Some(2024),
            granularity: QuarterBreakdown::Monthly,
        };
        assert!(matches!(
            plan_report(&command, d(2024, 7, 15)).unwrap_err(),
            ReportError::InvalidQuarter(5)
        ));
    }

    #[test]
    fn yearly_plan_defaults_to_previous_year() {
        let command = Commands::Yearly {
            year: None,
            granularity: YearBreakdown::Monthly,
        };
        let plan = plan_report(&command, d(2024, 7, 15)).unwrap();
        assert_eq!(plan.range, year_range(2023));
        assert!(plan.comparison);
        assert!(!plan.rollup_first);
    }

    #[test]
    fn yearly_quarterly_plan_rolls_up_without_comparison() {
        let command = Commands::Yearly {
            year: Some(2024),
            granularity: YearBreakdown::Quarterly,
        };
        let plan = plan_report(&command, d(2025, 3, 1)).unwrap();
        assert_eq!(plan.breakdown, Granularity::Quarter);
        assert!(plan.rollup_first);
        assert!(!plan.comparison);
        assert_eq!(plan.reference_year, 2024);
    }
}
