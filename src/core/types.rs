//! Core data types shared across the aggregation pipeline
//!
//! Every raw response is converted into a flat sequence of [`CostRecord`]s,
//! which the pivot, rollup, and summary stages consume immutably.

use chrono::NaiveDate;

use crate::consts::{TOTAL, UNKNOWN_PERIOD};

/// The axis cost is grouped by; fixed for the duration of one report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Dimension {
    Service,
    Account,
    Region,
    Tag,
}

impl Dimension {
    /// Column header used in rendered tables
    pub(crate) fn column_name(self) -> &'static str {
        match self {
            Dimension::Service => "Service",
            Dimension::Account => "Account",
            Dimension::Region => "Region",
            Dimension::Tag => "Tag",
        }
    }
}

/// Time-bucket size of a report view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Granularity {
    Day,
    Month,
    Quarter,
    Year,
}

impl Granularity {
    /// Header for the period column of a pivot table
    pub(crate) fn period_header(self) -> &'static str {
        match self {
            Granularity::Day => "Date",
            Granularity::Month => "Month",
            Granularity::Quarter => "Quarter",
            Granularity::Year => "Year",
        }
    }

    pub(crate) fn noun(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        }
    }

    pub(crate) fn adjective(self) -> &'static str {
        match self {
            Granularity::Day => "Daily",
            Granularity::Month => "Monthly",
            Granularity::Quarter => "Quarterly",
            Granularity::Year => "Yearly",
        }
    }
}

/// One cost ledger entry: a (time bucket, dimension value) pair.
///
/// `period_start..period_end` is a half-open calendar interval. The reserved
/// value [`TOTAL`] marks the synthetic per-period aggregate emitted by the
/// normalizer; it never collides with a real dimension value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CostRecord {
    pub(crate) period_start: NaiveDate,
    pub(crate) period_end: NaiveDate,
    pub(crate) dimension: Dimension,
    pub(crate) dimension_value: String,
    pub(crate) cost: f64,
    pub(crate) usage_quantity: f64,
    pub(crate) currency: String,
}

impl CostRecord {
    pub(crate) fn is_total(&self) -> bool {
        self.dimension_value == TOTAL
    }
}

/// A named, ordered time span at one granularity.
///
/// `start` doubles as the sort key: it is normalized to the bucket's first
/// day, so ordering by it is chronological regardless of how the label is
/// spelled ("February 2024" sorts before "November 2024").
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PeriodBucket {
    pub(crate) label: String,
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
}

impl PeriodBucket {
    /// Fallback bucket for dates outside the quarter map; sorts first.
    pub(crate) fn unknown() -> Self {
        PeriodBucket {
            label: UNKNOWN_PERIOD.to_string(),
            start: NaiveDate::MIN,
            end: NaiveDate::MIN,
        }
    }
}

/// Half-open calendar date range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateRange {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn dimension_column_names() {
        assert_eq!(Dimension::Service.column_name(), "Service");
        assert_eq!(Dimension::Account.column_name(), "Account");
        assert_eq!(Dimension::Region.column_name(), "Region");
        assert_eq!(Dimension::Tag.column_name(), "Tag");
    }

    #[test]
    fn granularity_period_headers() {
        assert_eq!(Granularity::Day.period_header(), "Date");
        assert_eq!(Granularity::Quarter.period_header(), "Quarter");
    }

    #[test]
    fn total_record_detection() {
        let record = CostRecord {
            period_start: d(2024, 1, 1),
            period_end: d(2024, 2, 1),
            dimension: Dimension::Service,
            dimension_value: "Total".to_string(),
            cost: 1.0,
            usage_quantity: 0.0,
            currency: "USD".to_string(),
        };
        assert!(record.is_total());
    }

    #[test]
    fn unknown_bucket_sorts_before_real_periods() {
        let unknown = PeriodBucket::unknown();
        assert!(unknown.start < d(1970, 1, 1));
        assert_eq!(unknown.label, "Unknown");
    }
}
