use chrono::{Datelike, NaiveDate};

use crate::core::types::DateRange;
use crate::error::ReportError;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, ReportError> {
    // Try YYYYMMDD
    if s.len() == 8 {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d") {
            return Ok(d);
        }
    }
    // Try YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    Err(ReportError::InvalidDate {
        input: s.to_string(),
    })
}

/// First day of the given month. The fallback is unreachable for any
/// month in 1..=12, which callers validate first.
pub(crate) fn first_of(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

pub(crate) fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 { (year + 1, 1) } else { (year, month + 1) }
}

pub(crate) fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// Quarter number (1-4) containing the given date
pub(crate) fn quarter_of(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

/// (year, month) of the month before the given date's month
pub(crate) fn previous_month(today: NaiveDate) -> (i32, u32) {
    if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    }
}

/// `[today - n days, today)`
pub(crate) fn last_n_days(today: NaiveDate, n: i64) -> DateRange {
    DateRange {
        start: today - chrono::Duration::days(n),
        end: today,
    }
}

pub(crate) fn month_range(year: i32, month: u32) -> Result<DateRange, ReportError> {
    if !(1..=12).contains(&month) {
        return Err(ReportError::InvalidMonth(month));
    }
    let (next_year, next) = next_month(year, month);
    Ok(DateRange {
        start: first_of(year, month),
        end: first_of(next_year, next),
    })
}

pub(crate) fn quarter_range(year: i32, quarter: u32) -> Result<DateRange, ReportError> {
    if !(1..=4).contains(&quarter) {
        return Err(ReportError::InvalidQuarter(quarter));
    }
    let start_month = (quarter - 1) * 3 + 1;
    let end = if quarter < 4 {
        first_of(year, start_month + 3)
    } else {
        first_of(year + 1, 1)
    };
    Ok(DateRange {
        start: first_of(year, start_month),
        end,
    })
}

pub(crate) fn year_range(year: i32) -> DateRange {
    DateRange {
        start: first_of(year, 1),
        end: first_of(year + 1, 1),
    }
}
