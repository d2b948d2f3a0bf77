//! Delimited (CSV) report rendering.

use super::report::ReportRow;
use crate::aggregator::CampaignMetrics;
use crate::utils::config::{CTR_PRECISION, MONEY_PRECISION, REPORT_COLUMNS, UNDEFINED_MARKER};
use crate::utils::error::OutputError;

/// Render ranked campaigns as a header-first CSV document
///
/// **Public** - used by the file report writer
///
/// # Example
/// ```ignore
/// let bytes = render_csv(&store.top_k_by_ctr(10))?;
/// ```
pub fn render_csv(rows: &[&CampaignMetrics]) -> Result<Vec<u8>, OutputError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(REPORT_COLUMNS)?;
    for metrics in rows {
        writer.write_record(format_record(&ReportRow::from(*metrics)))?;
    }

    writer
        .into_inner()
        .map_err(|e| OutputError::Csv(csv::Error::from(e.into_error())))
}

/// Format one row with fixed precision
///
/// **Public** - useful for tests and alternative writers
pub fn format_record(row: &ReportRow<'_>) -> [String; 7] {
    [
        row.campaign_id.to_string(),
        row.total_impressions.to_string(),
        row.total_clicks.to_string(),
        format!("{:.*}", MONEY_PRECISION, row.total_spend),
        row.total_conversions.to_string(),
        format!("{:.*}", CTR_PRECISION, row.ctr),
        match row.cpa {
            Some(cpa) => format!("{:.*}", MONEY_PRECISION, cpa),
            None => UNDEFINED_MARKER.to_string(),
        },
    ]
}
