/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reserved dimension value for the per-period aggregate row/column
pub(crate) const TOTAL: &str = "Total";

/// Sentinel label for a period that falls outside the quarter map
pub(crate) const UNKNOWN_PERIOD: &str = "Unknown";

/// Fallback value when a raw group carries no dimension key
pub(crate) const UNKNOWN: &str = "unknown";

/// Dimension value for tag groups whose tag value is empty
pub(crate) const UNTAGGED: &str = "untagged";

/// Vendor prefixes stripped from service names before grouping
pub(crate) const VENDOR_PREFIXES: &[&str] = &["Amazon ", "AWS "];

/// Metric names expected in every Cost Explorer group
pub(crate) const METRIC_COST: &str = "UnblendedCost";
pub(crate) const METRIC_USAGE: &str = "UsageQuantity";
