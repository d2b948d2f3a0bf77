//! Header resolution for the input feed.
//!
//! Required columns are located by exact, case-sensitive name. Their order
//! in the header does not matter and extra columns are ignored.

use crate::utils::config::{
    COL_CAMPAIGN_ID, COL_CLICKS, COL_CONVERSIONS, COL_IMPRESSIONS, COL_SPEND, REQUIRED_COLUMNS,
};
use crate::utils::error::IngestError;
use log::debug;

/// Positional index of every required column
///
/// **Public** - produced once per run from the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub campaign_id: usize,
    pub impressions: usize,
    pub clicks: usize,
    pub spend: usize,
    pub conversions: usize,
}

impl ColumnIndex {
    /// Resolve required column names to positions
    ///
    /// # Errors
    /// * `IngestError::MissingColumns` - at least one required column is absent
    pub fn from_header<'a, I>(header: I) -> Result<Self, IngestError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut found = Vec::new();
        let mut slots: [Option<usize>; 5] = [None; 5];

        for (position, raw) in header.into_iter().enumerate() {
            // Spreadsheet exports sometimes prefix the first header with a BOM
            let name = if position == 0 {
                raw.strip_prefix('\u{feff}').unwrap_or(raw)
            } else {
                raw
            };
            found.push(name.to_string());

            let slot = match name {
                COL_CAMPAIGN_ID => 0,
                COL_IMPRESSIONS => 1,
                COL_CLICKS => 2,
                COL_SPEND => 3,
                COL_CONVERSIONS => 4,
                _ => continue,
            };
            slots[slot] = Some(position);
        }

        match slots {
            [Some(campaign_id), Some(impressions), Some(clicks), Some(spend), Some(conversions)] => {
                let index = Self {
                    campaign_id,
                    impressions,
                    clicks,
                    spend,
                    conversions,
                };
                debug!("Resolved columns: {:?}", index);
                Ok(index)
            }
            _ => Err(IngestError::MissingColumns {
                required: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
                found,
            }),
        }
    }
}
