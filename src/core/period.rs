//! Period labeling: raw record dates → named, sortable period buckets
//!
//! Labeling is a pure function of (period_start, granularity, reference
//! year): the same date always maps to the same bucket within one run, no
//! matter which dimension value triggered the lookup.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use crate::consts::DATE_FORMAT;
use crate::core::types::{Granularity, PeriodBucket};
use crate::utils::date::{first_of, next_day, next_month};

pub(crate) struct PeriodLabeler {
    granularity: Granularity,
    quarter_map: Option<QuarterMap>,
}

impl PeriodLabeler {
    /// `reference_year` scopes the quarter map; other granularities label
    /// from the date alone.
    pub(crate) fn new(granularity: Granularity, reference_year: i32) -> Self {
        let quarter_map =
            (granularity == Granularity::Quarter).then(|| QuarterMap::for_year(reference_year));
        PeriodLabeler {
            granularity,
            quarter_map,
        }
    }

    pub(crate) fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub(crate) fn label(&self, period_start: NaiveDate) -> PeriodBucket {
        match self.granularity {
            Granularity::Day => PeriodBucket {
                label: period_start.format(DATE_FORMAT).to_string(),
                start: period_start,
                end: next_day(period_start),
            },
            Granularity::Month => month_bucket(period_start),
            Granularity::Quarter => match &self.quarter_map {
                Some(map) => map.bucket_for(period_start),
                None => PeriodBucket::unknown(),
            },
            Granularity::Year => year_bucket(period_start.year()),
        }
    }
}

fn month_bucket(date: NaiveDate) -> PeriodBucket {
    let start = first_of(date.year(), date.month());
    let (next_year, next) = next_month(date.year(), date.month());
    PeriodBucket {
        label: start.format("%B %Y").to_string(),
        start,
        end: first_of(next_year, next),
    }
}

fn year_bucket(year: i32) -> PeriodBucket {
    PeriodBucket {
        label: year.to_string(),
        start: first_of(year, 1),
        end: first_of(year + 1, 1),
    }
}

/// Date→quarter lookup for one reference year.
///
/// Raw data may arrive at month granularity and need quarter aggregation,
/// so the map enumerates each month of each quarter explicitly. Dates
/// outside the reference year fall back to the `"Unknown"` sentinel bucket
/// rather than failing; the normalizer should have kept them out.
pub(crate) struct QuarterMap {
    months: HashMap<NaiveDate, PeriodBucket>,
}

impl QuarterMap {
    pub(crate) fn for_year(year: i32) -> Self {
        let mut months = HashMap::new();
        for quarter in 1..=4u32 {
            let start_month = (quarter - 1) * 3 + 1;
            let end = if quarter < 4 {
                first_of(year, start_month + 3)
            } else {
                first_of(year + 1, 1)
            };
            let bucket = PeriodBucket {
                label: format!("Q{quarter} {year}"),
                start: first_of(year, start_month),
                end,
            };
            for offset in 0..3 {
                months.insert(first_of(year, start_month + offset), bucket.clone());
            }
        }
        QuarterMap { months }
    }

    pub(crate) fn bucket_for(&self, date: NaiveDate) -> PeriodBucket {
        let month_start = first_of(date.year(), date.month());
        self.months
            .get(&month_start)
            .cloned()
            .unwrap_or_else(PeriodBucket::unknown)
    }
}
