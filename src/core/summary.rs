//! Per-dimension totals, percentage shares, and top-N ranking

use std::collections::HashMap;

use crate::core::types::CostRecord;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SummaryRow {
    pub(crate) dimension_value: String,
    pub(crate) total_cost: f64,
    /// Share of the grand total as a fraction; 0 when the grand total is 0
    pub(crate) percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CostSummary {
    /// Sorted by cost descending; ties keep first-seen input order
    pub(crate) rows: Vec<SummaryRow>,
    /// Sum of all non-Total dimension totals
    pub(crate) grand_total: f64,
}

impl CostSummary {
    /// Strict prefix of `rows`, clamped to the available count
    pub(crate) fn top(&self, n: usize) -> &[SummaryRow] {
        &self.rows[..self.rows.len().min(n)]
    }
}

/// Sum cost per dimension value across all periods, excluding the
/// synthetic `Total` records.
pub(crate) fn summarize(records: &[CostRecord]) -> CostSummary {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();

    for record in records {
        if record.is_total() {
            continue;
        }
        if !totals.contains_key(&record.dimension_value) {
            order.push(record.dimension_value.clone());
        }
        *totals.entry(record.dimension_value.clone()).or_insert(0.0) += record.cost;
    }

    let grand_total: f64 = totals.values().sum();
    let mut rows: Vec<SummaryRow> = order
        .into_iter()
        .map(|value| {
            let total_cost = totals[&value];
            SummaryRow {
                dimension_value: value,
                total_cost,
                percentage: if grand_total > 0.0 {
                    total_cost / grand_total
                } else {
                    0.0
                },
            }
        })
        .collect();

    // Stable sort: equal costs keep their first-seen order, and the top-N
    // selection below stays a strict prefix of this same ranking.
    rows.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));

    CostSummary { rows, grand_total }
}
