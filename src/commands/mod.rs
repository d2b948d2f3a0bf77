//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod aggregate;
pub mod info;

// Re-export main command functions
pub use aggregate::{
    execute_aggregate, resolve_top_k, validate_args, AggregateArgs, AggregationService, RunOutcome,
};
pub use info::{display_schema, display_version};
