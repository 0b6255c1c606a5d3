//! Output boundary: the assembled report handed to a renderer
//!
//! The core hands over named pivot tables, the ranked summary with its
//! grand total, a top-N prefix, and pass-through metadata. Renderers own
//! presentation only; no aggregation happens past this point.

pub(crate) mod csv;
pub(crate) mod json;
pub(crate) mod table;

use chrono::{DateTime, Local};

use crate::core::{CostSummary, DateRange, Dimension, Granularity, PivotTable, SummaryRow};

/// Pass-through report metadata; nothing here is derived by the core.
pub(crate) struct ReportMeta {
    pub(crate) title: String,
    pub(crate) summary_title: String,
    pub(crate) granularity: Granularity,
    pub(crate) dimension: Dimension,
    pub(crate) range: DateRange,
    pub(crate) generated_at: DateTime<Local>,
    pub(crate) currency: Option<String>,
}

pub(crate) struct Report {
    pub(crate) meta: ReportMeta,
    pub(crate) breakdown: PivotTable,
    pub(crate) comparison: Option<PivotTable>,
    pub(crate) summary: CostSummary,
    pub(crate) top_n: usize,
}

impl Report {
    /// The top-N rows: always a strict prefix of the summary ranking.
    pub(crate) fn top(&self) -> &[SummaryRow] {
        self.summary.top(self.top_n)
    }
}

pub(crate) use csv::report_csv;
pub(crate) use json::report_json;
pub(crate) use table::{TableOptions, print_report};
