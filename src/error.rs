use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ReportError {
    #[error("Malformed {metric} amount \"{value}\" in period starting {period}")]
    MalformedAmount {
        metric: &'static str,
        value: String,
        period: String,
    },

    #[error("Missing {metric} metric for \"{key}\" in period starting {period}")]
    MissingMetric {
        metric: &'static str,
        key: String,
        period: String,
    },

    #[error("Mixed currencies in one report run: {expected} and {found}")]
    MixedCurrency { expected: String, found: String },

    #[error(
        "Dimension value \"Total\" in period starting {period} collides with the aggregate row"
    )]
    ReservedDimensionValue { period: String },

    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid period: start {start} is not before end {end}")]
    InvalidPeriod { start: String, end: String },

    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("Quarter must be between 1 and 4, got {0}")]
    InvalidQuarter(u32),

    #[error("--tag-key is required when --group-by=tag")]
    TagKeyRequired,

    #[error("No input files match \"{pattern}\"")]
    EmptyGlob { pattern: String },

    #[error("Invalid glob pattern \"{pattern}\": {source}")]
    BadGlob {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}
