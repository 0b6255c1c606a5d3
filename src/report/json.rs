//! JSON rendering of a report

use serde_json::{Value, json};

use crate::consts::DATE_FORMAT;
use crate::core::{PivotTable, SummaryRow};

use super::Report;

pub(crate) fn report_json(report: &Report) -> String {
    let meta = &report.meta;
    let value = json!({
        "meta": {
            "title": meta.title,
            "granularity": meta.granularity.noun(),
            "dimension": meta.dimension.column_name(),
            "period_start": meta.range.start.format(DATE_FORMAT).to_string(),
            "period_end": meta.range.end.format(DATE_FORMAT).to_string(),
            "generated_at": meta.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            "currency": meta.currency,
        },
        "breakdown": pivot_json(&report.breakdown),
        "comparison": report.comparison.as_ref().map(pivot_json),
        "summary": {
            "grand_total": report.summary.grand_total,
            "rows": report.summary.rows.iter().map(summary_row_json).collect::<Vec<_>>(),
        },
        "top": report.top().iter().map(summary_row_json).collect::<Vec<_>>(),
    });
    serde_json::to_string_pretty(&value).unwrap_or_default()
}

fn pivot_json(pivot: &PivotTable) -> Value {
    let rows: Vec<Value> = pivot
        .rows
        .iter()
        .map(|row| {
            let mut cells = serde_json::Map::new();
            for (column, cell) in pivot.columns.iter().zip(&row.cells) {
                // Absent cells are omitted entirely: no data is not $0.00
                if let Some(cost) = cell {
                    cells.insert(column.clone(), json!(cost));
                }
            }
            json!({
                "period": row.bucket.label,
                "start": row.bucket.start.format(DATE_FORMAT).to_string(),
                "cells": cells,
            })
        })
        .collect();

    json!({
        "title": pivot.title,
        "dimension": pivot.dimension.column_name(),
        "columns": pivot.columns,
        "rows": rows,
    })
}

fn summary_row_json(row: &SummaryRow) -> Value {
    json!({
        "dimension_value": row.dimension_value,
        "total_cost": row.total_cost,
        "percentage": row.percentage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Dimension, Granularity};
    use crate::core::{PeriodLabeler, build_pivot, summarize};
    use crate::core::types::CostRecord;
    use crate::report::ReportMeta;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_report() -> Report {
        let records = vec![
            CostRecord {
                period_start: d(2024, 1, 1),
                period_end: d(2024, 2, 1),
                dimension: Dimension::Service,
                dimension_value: "Storage".to_string(),
                cost: 10.0,
                usage_quantity: 1.0,
                currency: "USD".to_string(),
            },
            CostRecord {
                period_start: d(2024, 2, 1),
                period_end: d(2024, 3, 1),
                dimension: Dimension::Service,
                dimension_value: "Compute".to_string(),
                cost: 5.0,
                usage_quantity: 1.0,
                currency: "USD".to_string(),
            },
        ];
        let labeler = PeriodLabeler::new(Granularity::Month, 2024);
        Report {
            breakdown: build_pivot(&records, &labeler, "Monthly Breakdown", Dimension::Service),
            comparison: None,
            summary: summarize(&records),
            top_n: 5,
            meta: ReportMeta {
                title: "AWS 2024 Cost Report".to_string(),
                summary_title: "Yearly Summary".to_string(),
                granularity: Granularity::Year,
                dimension: Dimension::Service,
                range: crate::core::DateRange {
                    start: d(2024, 1, 1),
                    end: d(2025, 1, 1),
                },
                generated_at: chrono::Local::now(),
                currency: Some("USD".to_string()),
            },
        }
    }

    #[test]
    fn absent_cells_are_omitted() {
        let report = sample_report();
        let value: Value = serde_json::from_str(&report_json(&report)).unwrap();
        let rows = value["breakdown"]["rows"].as_array().unwrap();
        assert_eq!(rows[0]["period"], "January 2024");
        assert_eq!(rows[0]["cells"]["Storage"], 10.0);
        assert!(rows[0]["cells"].get("Compute").is_none());
    }

    #[test]
    fn summary_and_top_are_consistent() {
        let report = sample_report();
        let value: Value = serde_json::from_str(&report_json(&report)).unwrap();
        assert_eq!(value["summary"]["grand_total"], 15.0);
        let rows = value["summary"]["rows"].as_array().unwrap();
        let top = value["top"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        // top-N larger than row count clamps to all rows
        assert_eq!(top.len(), 2);
        assert_eq!(rows[0], top[0]);
    }
}
