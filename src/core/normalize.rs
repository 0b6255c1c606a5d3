//! Raw record normalization: nested API responses → flat `CostRecord`s
//!
//! A malformed record poisons aggregate correctness, so normalization
//! errors abort the run; they are never skipped. An empty response is not
//! an error and yields an empty record sequence.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::consts::{DATE_FORMAT, METRIC_COST, METRIC_USAGE, TOTAL, UNKNOWN, UNTAGGED, VENDOR_PREFIXES};
use crate::core::types::{CostRecord, Dimension};
use crate::error::ReportError;
use crate::source::response::{RawCostResponse, RawMetric, RawResultByTime};

pub(crate) fn normalize(
    response: &RawCostResponse,
    dimension: Dimension,
) -> Result<Vec<CostRecord>, ReportError> {
    let mut records = Vec::new();

    for result in &response.results_by_time {
        let (start, end) = parse_period(result)?;
        let period = result.time_period.start.as_str();

        for group in &result.groups {
            let raw_key = group.keys.first().map(String::as_str).unwrap_or(UNKNOWN);
            let value = canonical_value(dimension, raw_key);
            if value == TOTAL {
                return Err(ReportError::ReservedDimensionValue {
                    period: period.to_string(),
                });
            }
            let cost_metric = require_metric(&group.metrics, METRIC_COST, &value, period)?;
            let usage_metric = require_metric(&group.metrics, METRIC_USAGE, &value, period)?;
            records.push(CostRecord {
                period_start: start,
                period_end: end,
                dimension,
                dimension_value: value,
                cost: parse_amount(METRIC_COST, &cost_metric.amount, period)?,
                usage_quantity: parse_amount(METRIC_USAGE, &usage_metric.amount, period)?,
                currency: cost_metric.unit.clone(),
            });
        }
    }

    // Aggregate totals go in a second pass so every real dimension value
    // is seen before the first synthetic Total row.
    for result in &response.results_by_time {
        let Some(total) = &result.total else { continue };
        let period = result.time_period.start.as_str();
        let (cost_metric, usage_metric) = match (total.get(METRIC_COST), total.get(METRIC_USAGE)) {
            // Grouped responses report an empty Total; nothing to emit.
            (None, None) => continue,
            (Some(cost), Some(usage)) => (cost, usage),
            (Some(_), None) => {
                return Err(missing_metric(METRIC_USAGE, TOTAL, period));
            }
            (None, Some(_)) => {
                return Err(missing_metric(METRIC_COST, TOTAL, period));
            }
        };
        let (start, end) = parse_period(result)?;
        records.push(CostRecord {
            period_start: start,
            period_end: end,
            dimension,
            dimension_value: TOTAL.to_string(),
            cost: parse_amount(METRIC_COST, &cost_metric.amount, period)?,
            usage_quantity: parse_amount(METRIC_USAGE, &usage_metric.amount, period)?,
            currency: cost_metric.unit.clone(),
        });
    }

    verify_single_currency(&records)?;
    Ok(records)
}

/// Canonical grouping key for a raw dimension value. Applied before any
/// grouping, once, so identical underlying services collapse into one row.
pub(crate) fn canonical_value(dimension: Dimension, raw: &str) -> String {
    match dimension {
        Dimension::Service => {
            for prefix in VENDOR_PREFIXES {
                if let Some(stripped) = raw.strip_prefix(prefix) {
                    return stripped.to_string();
                }
            }
            raw.to_string()
        }
        Dimension::Tag => {
            // Tag keys arrive as "key$value"
            let value = raw.split_once('$').map(|(_, v)| v).unwrap_or(raw);
            if value.is_empty() {
                UNTAGGED.to_string()
            } else {
                value.to_string()
            }
        }
        Dimension::Account | Dimension::Region => raw.to_string(),
    }
}

/// All records in one run must share a currency; summing across currencies
/// would silently corrupt every total.
pub(crate) fn verify_single_currency(records: &[CostRecord]) -> Result<(), ReportError> {
    let mut expected: Option<&str> = None;
    for record in records {
        match expected {
            None => expected = Some(&record.currency),
            Some(currency) if currency != record.currency => {
                return Err(ReportError::MixedCurrency {
                    expected: currency.to_string(),
                    found: record.currency.clone(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn parse_period(result: &RawResultByTime) -> Result<(NaiveDate, NaiveDate), ReportError> {
    let start = parse_iso(&result.time_period.start)?;
    let end = parse_iso(&result.time_period.end)?;
    // Half-open interval invariant
    if start >= end {
        return Err(ReportError::InvalidPeriod {
            start: result.time_period.start.clone(),
            end: result.time_period.end.clone(),
        });
    }
    Ok((start, end))
}

fn parse_iso(s: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ReportError::InvalidDate {
        input: s.to_string(),
    })
}

fn require_metric<'a>(
    metrics: &'a HashMap<String, RawMetric>,
    metric: &'static str,
    key: &str,
    period: &str,
) -> Result<&'a RawMetric, ReportError> {
    metrics.get(metric).ok_or_else(|| missing_metric(metric, key, period))
}

fn missing_metric(metric: &'static str, key: &str, period: &str) -> ReportError {
    ReportError::MissingMetric {
        metric,
        key: key.to_string(),
        period: period.to_string(),
    }
}

fn parse_amount(metric: &'static str, raw: &str, period: &str) -> Result<f64, ReportError> {
    let malformed = || ReportError::MalformedAmount {
        metric,
        value: raw.to_string(),
        period: period.to_string(),
    };
    let amount: f64 = raw.trim().parse().map_err(|_| malformed())?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(malformed());
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> RawCostResponse {
        serde_json::from_value(value).unwrap()
    }

    fn metrics(cost: &str, usage: &str) -> serde_json::Value {
        json!({
            "UnblendedCost": {"Amount": cost, "Unit": "USD"},
            "UsageQuantity": {"Amount": usage, "Unit": "N/A"}
        })
    }

    fn monthly_period(start: &str, end: &str, groups: serde_json::Value) -> serde_json::Value {
        json!({
            "TimePeriod": {"Start": start, "End": end},
            "Groups": groups,
            "Total": {}
        })
    }

    #[test]
    fn flattens_groups_into_records() {
        let resp = response(json!({
            "ResultsByTime": [
                monthly_period("2024-01-01", "2024-02-01", json!([
                    {"Keys": ["Amazon Simple Storage Service"], "Metrics": metrics("10", "100")},
                    {"Keys": ["Amazon Elastic Compute Cloud"], "Metrics": metrics("5", "50")}
                ])),
                monthly_period("2024-02-01", "2024-03-01", json!([
                    {"Keys": ["Amazon Simple Storage Service"], "Metrics": metrics("20", "200")}
                ]))
            ]
        }));
        let records = normalize(&resp, Dimension::Service).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].dimension_value, "Simple Storage Service");
        assert_eq!(records[0].cost, 10.0);
        assert_eq!(records[0].usage_quantity, 100.0);
        assert_eq!(records[0].currency, "USD");
        assert_eq!(
            records[0].period_start,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            records[0].period_end,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
        assert_eq!(records[1].dimension_value, "Elastic Compute Cloud");
        assert_eq!(records[2].cost, 20.0);
    }

    #[test]
    fn emits_synthetic_total_records_after_groups() {
        let resp = response(json!({
            "ResultsByTime": [
                {
                    "TimePeriod": {"Start": "2024-01-01", "End": "2024-02-01"},
                    "Groups": [
                        {"Keys": ["Amazon Simple Storage Service"], "Metrics": metrics("10", "100")}
                    ],
                    "Total": metrics("10", "100")
                }
            ]
        }));
        let records = normalize(&resp, Dimension::Service).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[1].is_total());
        assert_eq!(records[1].cost, 10.0);
    }

    #[test]
    fn empty_total_is_skipped() {
        let resp = response(json!({
            "ResultsByTime": [
                monthly_period("2024-01-01", "2024-02-01", json!([
                    {"Keys": ["Amazon Simple Storage Service"], "Metrics": metrics("10", "100")}
                ]))
            ]
        }));
        let records = normalize(&resp, Dimension::Service).unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].is_total());
    }

    #[test]
    fn vendor_prefixes_collapse_before_grouping() {
        assert_eq!(
            canonical_value(Dimension::Service, "Amazon Simple Storage Service"),
            "Simple Storage Service"
        );
        assert_eq!(canonical_value(Dimension::Service, "AWS Lambda"), "Lambda");
        assert_eq!(
            canonical_value(Dimension::Service, "CloudFront"),
            "CloudFront"
        );
        // Prefix is stripped once, not recursively
        assert_eq!(
            canonical_value(Dimension::Service, "Amazon AWS Thing"),
            "AWS Thing"
        );
    }

    #[test]
    fn tag_values_drop_the_key_prefix() {
        assert_eq!(canonical_value(Dimension::Tag, "team$platform"), "platform");
        assert_eq!(canonical_value(Dimension::Tag, "team$"), "untagged");
        assert_eq!(canonical_value(Dimension::Tag, "bare-value"), "bare-value");
    }

    #[test]
    fn account_and_region_pass_through() {
        assert_eq!(
            canonical_value(Dimension::Account, "123456789012"),
            "123456789012"
        );
        assert_eq!(canonical_value(Dimension::Region, "us-east-1"), "us-east-1");
    }

    #[test]
    fn missing_usage_metric_fails() {
        let resp = response(json!({
            "ResultsByTime": [
                monthly_period("2024-01-01", "2024-02-01", json!([
                    {
                        "Keys": ["Amazon Simple Storage Service"],
                        "Metrics": {"UnblendedCost": {"Amount": "10", "Unit": "USD"}}
                    }
                ]))
            ]
        }));
        let err = normalize(&resp, Dimension::Service).unwrap_err();
        assert!(matches!(
            err,
            ReportError::MissingMetric {
                metric: "UsageQuantity",
                ..
            }
        ));
    }

    #[test]
    fn non_numeric_amount_fails() {
        let resp = response(json!({
            "ResultsByTime": [
                monthly_period("2024-01-01", "2024-02-01", json!([
                    {"Keys": ["Amazon Simple Storage Service"], "Metrics": metrics("ten", "100")}
                ]))
            ]
        }));
        assert!(matches!(
            normalize(&resp, Dimension::Service).unwrap_err(),
            ReportError::MalformedAmount { .. }
        ));
    }

    #[test]
    fn negative_amount_fails() {
        let resp = response(json!({
            "ResultsByTime": [
                monthly_period("2024-01-01", "2024-02-01", json!([
                    {"Keys": ["Amazon Simple Storage Service"], "Metrics": metrics("-1.0", "100")}
                ]))
            ]
        }));
        assert!(matches!(
            normalize(&resp, Dimension::Service).unwrap_err(),
            ReportError::MalformedAmount { .. }
        ));
    }

    #[test]
    fn mixed_currency_fails() {
        let resp = response(json!({
            "ResultsByTime": [
                monthly_period("2024-01-01", "2024-02-01", json!([
                    {"Keys": ["Amazon Simple Storage Service"], "Metrics": metrics("10", "100")},
                    {
                        "Keys": ["Amazon Elastic Compute Cloud"],
                        "Metrics": {
                            "UnblendedCost": {"Amount": "5", "Unit": "EUR"},
                            "UsageQuantity": {"Amount": "50", "Unit": "N/A"}
                        }
                    }
                ]))
            ]
        }));
        let err = normalize(&resp, Dimension::Service).unwrap_err();
        assert!(matches!(err, ReportError::MixedCurrency { .. }));
    }

    #[test]
    fn reserved_total_group_key_fails() {
        let resp = response(json!({
            "ResultsByTime": [
                monthly_period("2024-01-01", "2024-02-01", json!([
                    {"Keys": ["Total"], "Metrics": metrics("10", "100")}
                ]))
            ]
        }));
        assert!(matches!(
            normalize(&resp, Dimension::Account).unwrap_err(),
            ReportError::ReservedDimensionValue { .. }
        ));
    }

    #[test]
    fn inverted_period_fails() {
        let resp = response(json!({
            "ResultsByTime": [
                monthly_period("2024-02-01", "2024-01-01", json!([
                    {"Keys": ["Amazon Simple Storage Service"], "Metrics": metrics("10", "100")}
                ]))
            ]
        }));
        assert!(matches!(
            normalize(&resp, Dimension::Service).unwrap_err(),
            ReportError::InvalidPeriod { .. }
        ));
    }

    #[test]
    fn empty_response_yields_no_records() {
        let resp = response(json!({"ResultsByTime": []}));
        assert!(normalize(&resp, Dimension::Service).unwrap().is_empty());
    }

    #[test]
    fn verify_single_currency_accepts_uniform_and_empty() {
        assert!(verify_single_currency(&[]).is_ok());
    }
}
