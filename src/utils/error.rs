//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding the input feed
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read header: {0}")]
    Header(#[source] csv::Error),

    #[error("Missing required columns; need [{}], got [{}]", .required.join(", "), .found.join(", "))]
    MissingColumns {
        required: Vec<String>,
        found: Vec<String>,
    },

    #[error("Row {position}: {reason}")]
    InvalidRow { position: u64, reason: RowErrorKind },
}

impl IngestError {
    /// 1-based stream position of the offending row, header included
    pub fn position(&self) -> Option<u64> {
        match self {
            IngestError::InvalidRow { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Why a single data row was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowErrorKind {
    #[error("empty campaign_id")]
    EmptyCampaignId,

    #[error("bad {field} {value:?}: not a base-10 integer")]
    InvalidInteger { field: &'static str, value: String },

    #[error("bad {field} {value:?}: not a finite decimal number")]
    InvalidDecimal { field: &'static str, value: String },

    #[error("bad {field} {value:?}: must not be negative")]
    Negative { field: &'static str, value: String },

    #[error("malformed row: {0}")]
    Malformed(String),
}

/// Errors that can occur during report output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move {} into place: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
