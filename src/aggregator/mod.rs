//! Aggregation of decoded rows into per-campaign totals.
//!
//! This module provides:
//! - Campaign totals with derived CTR/CPA
//! - The `MetricsStore` capability and its map-backed implementation
//! - Deterministic top-K rankings

pub mod metrics;
pub mod ranking;
pub mod store;

// Re-export main types
pub use metrics::CampaignMetrics;
pub use store::{InMemoryStore, MetricsStore};
