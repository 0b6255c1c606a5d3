//! File-backed cost source and record loading

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::core::CostRecord;
use crate::core::normalize::{normalize, verify_single_currency};
use crate::error::ReportError;

use super::response::RawCostResponse;
use super::{CostQuery, CostSource};

/// Reads saved `aws ce get-cost-and-usage` JSON responses. Patterns are
/// glob-expanded; `-` (or no patterns at all) reads stdin.
pub(crate) struct JsonFileSource {
    patterns: Vec<String>,
}

impl JsonFileSource {
    pub(crate) fn new(patterns: Vec<String>) -> Self {
        JsonFileSource { patterns }
    }

    fn expand(&self) -> Result<Vec<PathBuf>, ReportError> {
        let mut paths = Vec::new();
        for pattern in &self.patterns {
            if pattern == "-" {
                continue;
            }
            let entries = glob::glob(pattern).map_err(|source| ReportError::BadGlob {
                pattern: pattern.clone(),
                source,
            })?;
            let mut matched = false;
            for entry in entries {
                let path = entry.map_err(|e| ReportError::Io {
                    path: pattern.clone(),
                    source: e.into_error(),
                })?;
                matched = true;
                paths.push(path);
            }
            if !matched {
                return Err(ReportError::EmptyGlob {
                    pattern: pattern.clone(),
                });
            }
        }
        Ok(paths)
    }

    fn wants_stdin(&self) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p == "-")
    }
}

impl CostSource for JsonFileSource {
    fn fetch(&self, _query: &CostQuery) -> Result<Vec<RawCostResponse>, ReportError> {
        let paths = self.expand()?;
        let mut responses: Vec<RawCostResponse> = paths
            .par_iter()
            .map(|path| {
                let content = fs::read_to_string(path).map_err(|source| ReportError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                serde_json::from_str(&content).map_err(|source| ReportError::Json {
                    path: path.display().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if self.wants_stdin() {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| ReportError::Io {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            responses.push(serde_json::from_str(&buf).map_err(|source| ReportError::Json {
                path: "<stdin>".to_string(),
                source,
            })?);
        }

        Ok(responses)
    }
}

/// Fetch and normalize everything the source provides. Record sequences
/// from separate responses are concatenated, not interleaved, so the
/// pipeline's single summation path sees one flat ledger. The currency
/// invariant is re-checked across response boundaries.
pub(crate) fn load_records(
    source: &dyn CostSource,
    query: &CostQuery,
) -> Result<Vec<CostRecord>, ReportError> {
    let responses = source.fetch(query)?;
    let mut records = Vec::new();
    for response in &responses {
        records.extend(normalize(response, query.dimension)?);
    }
    verify_single_currency(&records)?;
    Ok(records)
}
