//! Input feed decoding.
//!
//! This module handles:
//! - Resolving required columns from the header row
//! - Parsing field values to their semantic types
//! - Streaming decoded rows into a metrics store

pub mod columns;
pub mod feed;

// Re-export main types
pub use columns::ColumnIndex;
pub use feed::{decode_row, CsvRowProcessor, DecodedRow, IngestStats, RowPolicy, RowProcessor};
