//! Dimension pivot: flat records → period × dimension matrix of summed cost
//!
//! `group_records` is the single summation path. The pivot builder, the
//! rollup engine, and the comparison table all go through it, so a total
//! "reported quarterly" can never drift from one "summed from months".

use std::collections::HashMap;

use crate::consts::TOTAL;
use crate::core::period::PeriodLabeler;
use crate::core::types::{CostRecord, Dimension, PeriodBucket};

/// Cost and usage accumulated for one (bucket, dimension value) cell
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CellAgg {
    pub(crate) cost: f64,
    pub(crate) usage: f64,
}

/// Records grouped under one granularity, before table shaping
pub(crate) struct Grouped {
    /// Buckets in chronological order
    pub(crate) buckets: Vec<PeriodBucket>,
    /// Dimension values in first-seen order, `Total` forced last
    pub(crate) columns: Vec<String>,
    /// Keyed by (period label, dimension value)
    pub(crate) cells: HashMap<(String, String), CellAgg>,
    pub(crate) currency: Option<String>,
}

pub(crate) fn group_records(records: &[CostRecord], labeler: &PeriodLabeler) -> Grouped {
    let mut buckets: Vec<PeriodBucket> = Vec::new();
    let mut columns: Vec<String> = Vec::new();
    let mut cells: HashMap<(String, String), CellAgg> = HashMap::new();
    let mut currency: Option<String> = None;

    for record in records {
        let bucket = labeler.label(record.period_start);
        if !buckets.iter().any(|b| b.label == bucket.label) {
            buckets.push(bucket.clone());
        }
        if !columns.contains(&record.dimension_value) {
            columns.push(record.dimension_value.clone());
        }
        let cell = cells
            .entry((bucket.label, record.dimension_value.clone()))
            .or_default();
        cell.cost += record.cost;
        cell.usage += record.usage_quantity;
        if currency.is_none() {
            currency = Some(record.currency.clone());
        }
    }

    // Chronological, never lexicographic: bucket starts are normalized
    // dates, so "February 2024" lands before "November 2024" and quarters
    // order by quarter number.
    buckets.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.label.cmp(&b.label)));

    if let Some(pos) = columns.iter().position(|c| c == TOTAL) {
        let total = columns.remove(pos);
        columns.push(total);
    }

    Grouped {
        buckets,
        columns,
        cells,
        currency,
    }
}

/// Period × dimension matrix of summed costs.
///
/// A `None` cell means the dimension had no activity in that period and
/// renders blank; zero spend is a real `Some(0.0)` cell.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PivotTable {
    pub(crate) title: String,
    pub(crate) dimension: Dimension,
    pub(crate) period_header: &'static str,
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<PivotRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PivotRow {
    pub(crate) bucket: PeriodBucket,
    /// Aligned with `PivotTable::columns`
    pub(crate) cells: Vec<Option<f64>>,
}

impl PivotTable {
    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn cell(&self, period_label: &str, column: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column)?;
        let row = self.rows.iter().find(|r| r.bucket.label == period_label)?;
        row.cells[col]
    }
}

pub(crate) fn build_pivot(
    records: &[CostRecord],
    labeler: &PeriodLabeler,
    title: impl Into<String>,
    dimension: Dimension,
) -> PivotTable {
    let grouped = group_records(records, labeler);
    let rows = grouped
        .buckets
        .iter()
        .map(|bucket| {
            let cells = grouped
                .columns
                .iter()
                .map(|column| {
                    grouped
                        .cells
                        .get(&(bucket.label.clone(), column.clone()))
                        .map(|cell| cell.cost)
                })
                .collect();
            PivotRow {
                bucket: bucket.clone(),
                cells,
            }
        })
        .collect();

    PivotTable {
        title: title.into(),
        dimension,
        period_header: labeler.granularity().period_header(),
        columns: grouped.columns,
        rows,
    }
}
