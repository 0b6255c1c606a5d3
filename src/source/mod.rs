//! Input boundary: where raw cost data comes from
//!
//! The billing API itself is an external collaborator; this module pins
//! down its interface. `JsonFileSource` feeds the pipeline from saved
//! `aws ce get-cost-and-usage` responses.

pub(crate) mod loader;
pub(crate) mod response;

use crate::core::{DateRange, Dimension};
use crate::error::ReportError;
use response::RawCostResponse;

/// Granularity the raw data was fetched at; the output granularity is the
/// labeler's concern and may be coarser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FetchGranularity {
    Daily,
    Monthly,
}

impl FetchGranularity {
    pub(crate) fn noun(self) -> &'static str {
        match self {
            FetchGranularity::Daily => "daily",
            FetchGranularity::Monthly => "monthly",
        }
    }
}

/// One fetch request to the billing API
#[derive(Debug, Clone)]
pub(crate) struct CostQuery {
    pub(crate) range: DateRange,
    pub(crate) granularity: FetchGranularity,
    pub(crate) dimension: Dimension,
    pub(crate) tag_key: Option<String>,
}

pub(crate) trait CostSource {
    /// Fetch raw responses for the query. A file-backed source returns one
    /// response per input file; callers concatenate the normalized record
    /// sequences rather than interleaving them.
    fn fetch(&self, query: &CostQuery) -> Result<Vec<RawCostResponse>, ReportError>;
}

pub(crate) use loader::{JsonFileSource, load_records};
