//! Ad Performance Aggregator CLI
//!
//! Aggregates advertising performance rows per campaign and writes
//! ranked CTR and CPA reports.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use ad_performance_aggregator::commands::{
    display_schema, display_version, execute_aggregate, validate_args, AggregateArgs,
};
use ad_performance_aggregator::output::ReportFormat;
use ad_performance_aggregator::parser::RowPolicy;

/// Ad Performance Aggregator - ranked campaign reports from CSV feeds
#[derive(Parser, Debug)]
#[command(name = "csvagg")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate a CSV feed and write top-K reports
    Aggregate {
        /// Path to input CSV file
        #[arg(short, long, env = "CSVAGG_INPUT")]
        input: PathBuf,

        /// Directory for the generated reports
        #[arg(short, long, env = "CSVAGG_OUTPUT", default_value = "reports")]
        output: PathBuf,

        /// Number of top campaigns per report (non-positive uses the default)
        #[arg(short = 'k', long, default_value = "10", allow_negative_numbers = true)]
        top_k: i64,

        /// Report encoding
        #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
        format: ReportFormat,

        /// Policy for rows that fail to decode
        #[arg(long, value_enum, default_value_t = RowPolicy::Abort)]
        on_bad_row: RowPolicy,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Log timing for each phase
        #[arg(long)]
        benchmark: bool,
    },

    /// Display input and report schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Aggregate {
            input,
            output,
            top_k,
            format,
            on_bad_row,
            summary,
            benchmark,
        } => {
            let args = AggregateArgs {
                input,
                output_dir: output,
                top_k,
                format,
                on_bad_row,
                print_summary: summary,
                benchmark,
            };

            // Validate args first
            validate_args(&args)?;

            execute_aggregate(args)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
