//! Serde model of the Cost Explorer `GetCostAndUsage` response
//!
//! Matches the JSON emitted by `aws ce get-cost-and-usage` (and the wire
//! shape behind the SDK): PascalCase keys, string-encoded amounts. When the
//! request groups by a dimension, `Total` is present but empty per period.

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawCostResponse {
    #[serde(default)]
    pub(crate) results_by_time: Vec<RawResultByTime>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawResultByTime {
    pub(crate) time_period: RawDateInterval,
    #[serde(default)]
    pub(crate) groups: Vec<RawGroup>,
    #[serde(default)]
    pub(crate) total: Option<HashMap<String, RawMetric>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawDateInterval {
    pub(crate) start: String,
    pub(crate) end: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawGroup {
    #[serde(default)]
    pub(crate) keys: Vec<String>,
    #[serde(default)]
    pub(crate) metrics: HashMap<String, RawMetric>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawMetric {
    pub(crate) amount: String,
    pub(crate) unit: String,
}
