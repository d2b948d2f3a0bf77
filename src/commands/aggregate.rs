//! Aggregate command implementation.
//!
//! The aggregate command:
//! 1. Streams the input feed into a fresh store
//! 2. Ranks campaigns and writes both reports together with the run summary

use crate::aggregator::{InMemoryStore, MetricsStore};
use crate::output::{
    render_summary, render_text_summary, Artifact, FileReportWriter, ReportFormat, ReportPaths,
    ReportWriter, RunSummary,
};
use crate::parser::{CsvRowProcessor, IngestStats, RowPolicy, RowProcessor};
use crate::utils::config::{DEFAULT_TOP_K, SUMMARY_FILE_NAME};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the aggregate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AggregateArgs {
    /// Input CSV path
    pub input: PathBuf,

    /// Directory receiving the reports
    pub output_dir: PathBuf,

    /// Requested report size; non-positive values fall back to the default
    pub top_k: i64,

    /// Report encoding
    pub format: ReportFormat,

    /// What to do with rows that fail to decode
    pub on_bad_row: RowPolicy,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Log timing and row counts
    pub benchmark: bool,
}

impl Default for AggregateArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_dir: PathBuf::from("reports"),
            top_k: DEFAULT_TOP_K as i64,
            format: ReportFormat::Csv,
            on_bad_row: RowPolicy::Abort,
            print_summary: false,
            benchmark: false,
        }
    }
}

/// Result of a successful run
#[derive(Debug)]
pub struct RunOutcome {
    pub store: InMemoryStore,
    pub stats: IngestStats,
    pub reports: ReportPaths,
}

/// Runs one decode → aggregate → report pass
///
/// **Public** - generic over the decoding and output seams
pub struct AggregationService<P, W> {
    processor: P,
    writer: W,
    benchmark: bool,
}

impl<P: RowProcessor, W: ReportWriter> AggregationService<P, W> {
    pub fn new(processor: P, writer: W) -> Self {
        Self {
            processor,
            writer,
            benchmark: false,
        }
    }

    /// Enable timing logs for each phase
    pub fn with_benchmark(mut self, benchmark: bool) -> Self {
        self.benchmark = benchmark;
        self
    }

    /// Aggregate `input` and write the reports
    ///
    /// Reports are only written after the whole input decoded successfully.
    pub fn run(&self, input: &mut dyn Read) -> Result<RunOutcome> {
        self.run_with(input, |_, _, _| Ok(Vec::new()))
    }

    /// Like [`AggregationService::run`], attaching extra artifacts to the report batch
    ///
    /// `attach` sees the ingest counters, the finished store and the planned
    /// report locations. Whatever it returns is written in the same atomic
    /// batch as the reports.
    pub fn run_with<F>(&self, input: &mut dyn Read, attach: F) -> Result<RunOutcome>
    where
        F: FnOnce(&IngestStats, &dyn MetricsStore, &ReportPaths) -> Result<Vec<Artifact>>,
    {
        let mut store = InMemoryStore::new();

        let started = Instant::now();
        let stats = self
            .processor
            .process(input, &mut store)
            .context("Failed to aggregate input")?;
        if self.benchmark {
            info!(
                "benchmark: aggregated {} campaigns in {:.3}s",
                store.len(),
                started.elapsed().as_secs_f64()
            );
        }

        let started = Instant::now();
        let view: &dyn MetricsStore = &store;
        let planned = self.writer.plan(view);
        let extra = attach(&stats, view, &planned)?;
        let reports = self
            .writer
            .write_reports_with(&store, extra)
            .context("Failed to write reports")?;
        if self.benchmark {
            info!(
                "benchmark: ranked and wrote reports in {:.3}s",
                started.elapsed().as_secs_f64()
            );
        }

        Ok(RunOutcome {
            store,
            stats,
            reports,
        })
    }
}

/// Execute the aggregate command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input cannot be opened
/// * Header misses a required column
/// * A row fails to decode (unless `on_bad_row` is `Skip`)
/// * Reports or summary cannot be written
pub fn execute_aggregate(args: AggregateArgs) -> Result<RunSummary> {
    let start_time = Instant::now();
    let top_k = resolve_top_k(args.top_k);

    info!("Starting aggregation of: {}", args.input.display());

    // Step 1: Open input
    info!("Step 1/2: Opening input...");
    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open input {}", args.input.display()))?;
    let mut input = BufReader::new(file);

    // Step 2: Aggregate, then write reports and summary as one batch
    info!("Step 2/2: Aggregating rows and writing top {} reports...", top_k);
    let processor = CsvRowProcessor::new()
        .with_policy(args.on_bad_row)
        .with_benchmark(args.benchmark);
    let writer = FileReportWriter::new(&args.output_dir, top_k).with_format(args.format);
    let service = AggregationService::new(processor, writer).with_benchmark(args.benchmark);

    let summary_path = args.output_dir.join(SUMMARY_FILE_NAME);
    let mut summary = None;
    let outcome = service.run_with(&mut input, |stats, store, reports| {
        let built = RunSummary::new(
            &args.input,
            top_k,
            *stats,
            store.len(),
            reports.clone(),
            start_time.elapsed().as_millis() as u64,
        );
        let bytes = render_summary(&built).context("Failed to render run summary")?;
        summary = Some(built);
        Ok(vec![(summary_path.clone(), bytes)])
    })?;
    let summary = summary.context("Run summary was not produced")?;

    debug!(
        "Read {} rows, aggregated {}, skipped {}",
        outcome.stats.rows_read, outcome.stats.rows_aggregated, outcome.stats.rows_skipped
    );
    if outcome.stats.rows_skipped > 0 {
        warn!("{} rows were skipped", outcome.stats.rows_skipped);
    }
    if let Some(best) = outcome.store.top_k_by_ctr(1).first() {
        debug!("Best CTR: {}", best);
    }
    if let Some(best) = outcome.store.top_k_by_cpa(1).first() {
        debug!("Best CPA: {}", best);
    }

    info!("✓ CTR report written to: {}", outcome.reports.ctr.display());
    info!("✓ CPA report written to: {}", outcome.reports.cpa.display());
    info!("✓ Summary written to: {}", summary_path.display());

    if args.print_summary {
        let ctr_rows = outcome.store.top_k_by_ctr(top_k);
        let cpa_rows = outcome.store.top_k_by_cpa(top_k);

        println!("\n{}", "=".repeat(80));
        println!("CAMPAIGN SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Input:      {}", args.input.display());
        println!("Rows:       {}", outcome.stats.rows_read);
        println!("Campaigns:  {}", outcome.store.len());
        println!("\n{}", render_text_summary(&ctr_rows, &cpa_rows));
        println!("{}", "=".repeat(80));
    }

    info!(
        "Aggregation completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(summary)
}

/// Validate aggregate arguments
///
/// **Public** - can be called before execute_aggregate for early validation
pub fn validate_args(args: &AggregateArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    if args.output_dir.as_os_str().is_empty() {
        anyhow::bail!("Output directory cannot be empty");
    }

    if args.output_dir.is_file() {
        anyhow::bail!(
            "Output path is a file, expected a directory: {}",
            args.output_dir.display()
        );
    }

    Ok(())
}

/// Resolve the requested report size
///
/// Non-positive values fall back to the default.
pub fn resolve_top_k(requested: i64) -> usize {
    if requested <= 0 {
        warn!(
            "top-k must be positive (got {}), using default {}",
            requested, DEFAULT_TOP_K
        );
        return DEFAULT_TOP_K;
    }
    usize::try_from(requested).unwrap_or(usize::MAX)
}
