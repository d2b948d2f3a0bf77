//! Ad Performance Aggregator
//!
//! Streaming aggregation and top-K ranking of advertising
//! performance CSV feeds.
//!
//! This crate provides the core implementation for the
//! `csvagg` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! csvagg aggregate --input ads.csv --output reports --top-k 10
//! ```
//!
//! Library users drive the same pipeline directly:
//!
//! ```ignore
//! let mut store = InMemoryStore::new();
//! CsvRowProcessor::new().process(&mut input, &mut store)?;
//! let best = store.top_k_by_ctr(10);
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
