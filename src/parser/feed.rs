//! Streaming CSV decoder that feeds a [`MetricsStore`].
//!
//! Reads the header once, then decodes one record at a time into a reused
//! buffer. Nothing but the running totals is retained between rows.

use super::columns::ColumnIndex;
use crate::aggregator::MetricsStore;
use crate::utils::error::{IngestError, RowErrorKind};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Read;
use std::time::Instant;

/// What to do with a row that fails to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RowPolicy {
    /// Fail the whole run on the first bad row
    #[default]
    Abort,

    /// Log the bad row, count it, and keep going
    Skip,
}

/// Row counters for one ingestion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Data rows read (header excluded)
    pub rows_read: u64,

    /// Rows folded into the store
    pub rows_aggregated: u64,

    /// Rows rejected under `RowPolicy::Skip`
    pub rows_skipped: u64,
}

/// Turns an input stream into store observations
///
/// **Public** - the seam between decoding and aggregation
pub trait RowProcessor {
    fn process(
        &self,
        input: &mut dyn Read,
        store: &mut dyn MetricsStore,
    ) -> Result<IngestStats, IngestError>;
}

/// `RowProcessor` for header-first, comma-delimited input
#[derive(Debug, Clone, Default)]
pub struct CsvRowProcessor {
    policy: RowPolicy,
    benchmark: bool,
}

/// One decoded row, borrowing the campaign id from the record buffer
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRow<'r> {
    pub campaign_id: &'r str,
    pub impressions: i64,
    pub clicks: i64,
    pub spend: Decimal,
    pub conversions: i64,
}

impl CsvRowProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bad-row policy
    pub fn with_policy(mut self, policy: RowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enable timing and row-count logs
    pub fn with_benchmark(mut self, benchmark: bool) -> Self {
        self.benchmark = benchmark;
        self
    }

    /// Apply the row policy to a rejected row
    ///
    /// **Private** - internal helper for process
    fn reject(
        &self,
        position: u64,
        reason: RowErrorKind,
        stats: &mut IngestStats,
    ) -> Result<(), IngestError> {
        match self.policy {
            RowPolicy::Abort => Err(IngestError::InvalidRow { position, reason }),
            RowPolicy::Skip => {
                warn!("Skipping row {}: {}", position, reason);
                stats.rows_skipped += 1;
                Ok(())
            }
        }
    }
}

impl RowProcessor for CsvRowProcessor {
    fn process(
        &self,
        input: &mut dyn Read,
        store: &mut dyn MetricsStore,
    ) -> Result<IngestStats, IngestError> {
        let start = Instant::now();

        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(input);

        let header = reader.headers().map_err(header_error)?.clone();
        let columns = ColumnIndex::from_header(&header)?;

        let mut record = StringRecord::new();
        let mut stats = IngestStats::default();
        // Header occupies position 1
        let mut position: u64 = 1;

        loop {
            let more = match reader.read_record(&mut record) {
                Ok(more) => more,
                Err(err) if err.is_io_error() => return Err(IngestError::Io(err.into())),
                Err(err) => {
                    position += 1;
                    stats.rows_read += 1;
                    self.reject(position, RowErrorKind::Malformed(err.to_string()), &mut stats)?;
                    continue;
                }
            };
            if !more {
                break;
            }

            position += 1;
            stats.rows_read += 1;

            match decode_row(&record, &columns) {
                Ok(row) => {
                    store.add(row.campaign_id, row.impressions, row.clicks, row.spend, row.conversions);
                    stats.rows_aggregated += 1;
                }
                Err(reason) => self.reject(position, reason, &mut stats)?,
            }
        }

        debug!(
            "Ingested {} rows into {} campaigns ({} skipped)",
            stats.rows_aggregated,
            store.len(),
            stats.rows_skipped
        );

        if self.benchmark {
            info!(
                "benchmark: parsed {} data rows in {:.3}s",
                stats.rows_read,
                start.elapsed().as_secs_f64()
            );
        }

        Ok(stats)
    }
}

/// Decode the required fields of one record
///
/// **Public** - exposed for testing and alternative processors
///
/// # Errors
/// Returns the reason the row was rejected; the caller attaches the position.
pub fn decode_row<'r>(
    record: &'r StringRecord,
    columns: &ColumnIndex,
) -> Result<DecodedRow<'r>, RowErrorKind> {
    let field = |index: usize, name: &'static str| {
        record
            .get(index)
            .ok_or_else(|| RowErrorKind::Malformed(format!("missing {} field", name)))
    };

    let campaign_id = field(columns.campaign_id, "campaign_id")?;
    if campaign_id.is_empty() {
        return Err(RowErrorKind::EmptyCampaignId);
    }

    Ok(DecodedRow {
        campaign_id,
        impressions: parse_count("impressions", field(columns.impressions, "impressions")?)?,
        clicks: parse_count("clicks", field(columns.clicks, "clicks")?)?,
        spend: parse_spend(field(columns.spend, "spend")?)?,
        conversions: parse_count("conversions", field(columns.conversions, "conversions")?)?,
    })
}

/// Parse a non-negative base-10 integer
///
/// **Private** - internal helper for decode_row
fn parse_count(field: &'static str, raw: &str) -> Result<i64, RowErrorKind> {
    let value: i64 = raw.parse().map_err(|_| RowErrorKind::InvalidInteger {
        field,
        value: raw.to_string(),
    })?;

    if value < 0 {
        return Err(RowErrorKind::Negative {
            field,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

/// Parse a non-negative decimal amount exactly
///
/// **Private** - internal helper for decode_row
///
/// Plain (`12.50`) and scientific (`1.25e1`) notation are accepted.
fn parse_spend(raw: &str) -> Result<Decimal, RowErrorKind> {
    let value = raw
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| RowErrorKind::InvalidDecimal {
            field: "spend",
            value: raw.to_string(),
        })?;

    if value < Decimal::ZERO {
        return Err(RowErrorKind::Negative {
            field: "spend",
            value: raw.to_string(),
        });
    }
    Ok(value)
}

/// Map a header read failure onto the ingest taxonomy
///
/// **Private** - internal helper for process
fn header_error(err: csv::Error) -> IngestError {
    if err.is_io_error() {
        IngestError::Io(err.into())
    } else {
        IngestError::Header(err)
    }
}
