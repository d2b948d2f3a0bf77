//! Ranked report emission.
//!
//! A run produces two artifacts: campaigns by descending CTR and campaigns
//! by ascending CPA. Both are rendered in memory and written in one batch,
//! together with any extra artifacts the caller attaches.

use super::delimited::render_csv;
use super::file::{ensure_dir, write_atomic_batch, Artifact};
use super::json::render_json;
use crate::aggregator::{CampaignMetrics, MetricsStore};
use crate::utils::config::DEFAULT_TOP_K;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use std::path::PathBuf;

/// Output encoding for the ranked reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }

    /// Encode ranked rows in this format
    pub fn render(&self, rows: &[&CampaignMetrics]) -> Result<Vec<u8>, OutputError> {
        match self {
            ReportFormat::Csv => render_csv(rows),
            ReportFormat::Json => render_json(rows),
        }
    }
}

/// Which ranking a report holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Highest click-through rate first
    Ctr,
    /// Lowest cost per acquisition first, converting campaigns only
    Cpa,
}

impl ReportKind {
    fn slug(&self) -> &'static str {
        match self {
            ReportKind::Ctr => "ctr",
            ReportKind::Cpa => "cpa",
        }
    }

    /// File name for a report of this kind, e.g. `top10_ctr.csv`
    pub fn file_name(&self, top_k: usize, format: ReportFormat) -> String {
        format!("top{}_{}.{}", top_k, self.slug(), format.extension())
    }
}

/// One rendered report line
///
/// **Public** - shared by the CSV and JSON encoders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow<'a> {
    pub campaign_id: &'a str,
    pub total_impressions: i64,
    pub total_clicks: i64,
    pub total_spend: f64,
    pub total_conversions: i64,
    pub ctr: f64,
    /// `None` when the campaign has no conversions
    pub cpa: Option<f64>,
}

impl<'a> From<&'a CampaignMetrics> for ReportRow<'a> {
    fn from(m: &'a CampaignMetrics) -> Self {
        Self {
            campaign_id: &m.campaign_id,
            total_impressions: m.total_impressions,
            total_clicks: m.total_clicks,
            total_spend: m.spend(),
            total_conversions: m.total_conversions,
            ctr: m.ctr(),
            cpa: m.cpa_checked(),
        }
    }
}

/// Where the reports of a run were written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPaths {
    pub ctr: PathBuf,
    pub ctr_rows: usize,
    pub cpa: PathBuf,
    pub cpa_rows: usize,
}

/// Emits the ranked reports for a finished store
///
/// **Public** - the seam between aggregation and output
pub trait ReportWriter {
    /// Report locations and row counts for `store`, without writing
    fn plan(&self, store: &dyn MetricsStore) -> ReportPaths;

    /// Write both reports and every `extra` artifact as one batch
    ///
    /// Either all files land or none of the targets change.
    fn write_reports_with(
        &self,
        store: &dyn MetricsStore,
        extra: Vec<Artifact>,
    ) -> Result<ReportPaths, OutputError>;

    fn write_reports(&self, store: &dyn MetricsStore) -> Result<ReportPaths, OutputError> {
        self.write_reports_with(store, Vec::new())
    }
}

/// `ReportWriter` that persists both reports into a directory
#[derive(Debug, Clone)]
pub struct FileReportWriter {
    output_dir: PathBuf,
    top_k: usize,
    format: ReportFormat,
}

impl FileReportWriter {
    /// Create a writer for `output_dir`
    ///
    /// A `top_k` of zero falls back to the default of 10.
    pub fn new(output_dir: impl Into<PathBuf>, top_k: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            top_k: if top_k == 0 { DEFAULT_TOP_K } else { top_k },
            format: ReportFormat::default(),
        }
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Destination of a report of the given kind
    pub fn report_path(&self, kind: ReportKind) -> PathBuf {
        self.output_dir.join(kind.file_name(self.top_k, self.format))
    }
}

impl ReportWriter for FileReportWriter {
    fn plan(&self, store: &dyn MetricsStore) -> ReportPaths {
        ReportPaths {
            ctr: self.report_path(ReportKind::Ctr),
            ctr_rows: store.top_k_by_ctr(self.top_k).len(),
            cpa: self.report_path(ReportKind::Cpa),
            cpa_rows: store.top_k_by_cpa(self.top_k).len(),
        }
    }

    fn write_reports_with(
        &self,
        store: &dyn MetricsStore,
        extra: Vec<Artifact>,
    ) -> Result<ReportPaths, OutputError> {
        ensure_dir(&self.output_dir)?;

        let ctr_rows = store.top_k_by_ctr(self.top_k);
        let cpa_rows = store.top_k_by_cpa(self.top_k);
        debug!(
            "Rendering {} CTR rows and {} CPA rows as {:?}",
            ctr_rows.len(),
            cpa_rows.len(),
            self.format
        );

        let paths = ReportPaths {
            ctr: self.report_path(ReportKind::Ctr),
            ctr_rows: ctr_rows.len(),
            cpa: self.report_path(ReportKind::Cpa),
            cpa_rows: cpa_rows.len(),
        };

        let mut files = vec![
            (paths.ctr.clone(), self.format.render(&ctr_rows)?),
            (paths.cpa.clone(), self.format.render(&cpa_rows)?),
        ];
        files.extend(extra);
        write_atomic_batch(&files)?;

        info!("Wrote {} campaigns to {}", paths.ctr_rows, paths.ctr.display());
        info!("Wrote {} campaigns to {}", paths.cpa_rows, paths.cpa.display());
        for (path, _) in &files[2..] {
            info!("Wrote {}", path.display());
        }

        Ok(paths)
    }
}
