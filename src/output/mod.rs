//! Output writers for ranked reports.
//!
//! This module handles writing data to disk in various formats:
//! - CSV reports (default)
//! - JSON reports and the run summary
//! - Text summaries for the console

pub mod delimited;
pub mod file;
pub mod json;
pub mod report;
pub mod text;

// Re-export main types and functions
pub use delimited::render_csv;
pub use file::{validate_path, write_atomic_batch, Artifact};
pub use json::{render_json, render_summary, RunSummary};
pub use report::{FileReportWriter, ReportFormat, ReportKind, ReportPaths, ReportRow, ReportWriter};
pub use text::render_text_summary;
