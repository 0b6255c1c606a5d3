//! Rollup engine: re-aggregate finer-grained records into coarser buckets
//!
//! A rollup is a re-label at the coarser granularity followed by the same
//! grouping the pivot builder uses, so derived tables (quarterly from
//! monthly, a quarter-over-quarter comparison) share the pivot's one
//! summation path. Usage quantity is summed under the identical key;
//! currency is carried through on the normalizer's single-currency
//! guarantee.

use crate::core::period::PeriodLabeler;
use crate::core::pivot::group_records;
use crate::core::types::{CostRecord, Dimension};

/// Re-emit `records` aggregated at the labeler's granularity. Each output
/// record spans its whole bucket.
pub(crate) fn rollup_records(
    records: &[CostRecord],
    labeler: &PeriodLabeler,
    dimension: Dimension,
) -> Vec<CostRecord> {
    let grouped = group_records(records, labeler);
    let currency = grouped.currency.clone().unwrap_or_default();

    let mut rolled = Vec::with_capacity(grouped.cells.len());
    for bucket in &grouped.buckets {
        for column in &grouped.columns {
            if let Some(cell) = grouped.cells.get(&(bucket.label.clone(), column.clone())) {
                rolled.push(CostRecord {
                    period_start: bucket.start,
                    period_end: bucket.end,
                    dimension,
                    dimension_value: column.clone(),
                    cost: cell.cost,
                    usage_quantity: cell.usage,
                    currency: currency.clone(),
                });
            }
        }
    }
    rolled
}
