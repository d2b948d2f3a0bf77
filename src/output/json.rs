//! JSON output: ranked reports and the run summary.

use super::report::{ReportPaths, ReportRow};
use crate::aggregator::CampaignMetrics;
use crate::parser::IngestStats;
use crate::utils::config::SUMMARY_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use serde::Serialize;
use std::path::Path;

/// Render ranked campaigns as a pretty JSON array
///
/// **Public** - used by the file report writer
///
/// Undefined CPA is encoded as `null`.
pub fn render_json(rows: &[&CampaignMetrics]) -> Result<Vec<u8>, OutputError> {
    let rows: Vec<ReportRow<'_>> = rows.iter().map(|m| ReportRow::from(*m)).collect();
    let mut bytes = serde_json::to_vec_pretty(&rows)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Machine-readable record of one run
///
/// **Public** - written next to the reports
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Summary schema version
    pub version: String,

    /// ISO 8601 timestamp
    pub generated_at: String,

    /// Input file that was aggregated
    pub input: String,

    /// Requested report size after defaulting
    pub top_k: usize,

    /// Row counters from ingestion
    pub rows: IngestStats,

    /// Distinct campaigns aggregated
    pub campaigns: usize,

    /// Report locations and row counts
    pub reports: ReportPaths,

    /// Wall-clock duration of the run
    pub elapsed_ms: u64,
}

impl RunSummary {
    pub fn new(
        input: &Path,
        top_k: usize,
        rows: IngestStats,
        campaigns: usize,
        reports: ReportPaths,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            version: SUMMARY_SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            input: input.display().to_string(),
            top_k,
            rows,
            campaigns,
            reports,
            elapsed_ms,
        }
    }
}

/// Render the run summary as pretty JSON
///
/// **Public** - the bytes are written in the same batch as the reports
///
/// # Errors
/// * `OutputError::SerializationFailed` - JSON serialization error
pub fn render_summary(summary: &RunSummary) -> Result<Vec<u8>, OutputError> {
    let mut bytes = serde_json::to_vec_pretty(summary)?;
    bytes.push(b'\n');
    Ok(bytes)
}
