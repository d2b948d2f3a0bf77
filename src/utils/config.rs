//! Configuration and constants for the CLI.

/// Number of campaigns per report when the caller does not ask for one
pub const DEFAULT_TOP_K: usize = 10;

/// Current run summary schema version
pub const SUMMARY_SCHEMA_VERSION: &str = "1.0.0";

/// File name of the run summary written next to the reports
pub const SUMMARY_FILE_NAME: &str = "summary.json";

// Input columns, matched by exact (case-sensitive) name in any order
pub const COL_CAMPAIGN_ID: &str = "campaign_id";
pub const COL_IMPRESSIONS: &str = "impressions";
pub const COL_CLICKS: &str = "clicks";
pub const COL_SPEND: &str = "spend";
pub const COL_CONVERSIONS: &str = "conversions";

pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_CAMPAIGN_ID,
    COL_IMPRESSIONS,
    COL_CLICKS,
    COL_SPEND,
    COL_CONVERSIONS,
];

/// Column set shared by the CTR and CPA reports
pub const REPORT_COLUMNS: &[&str] = &[
    "campaign_id",
    "total_impressions",
    "total_clicks",
    "total_spend",
    "total_conversions",
    "ctr",
    "cpa",
];

// Fractional digits used when rendering reports
pub const CTR_PRECISION: usize = 6;
pub const MONEY_PRECISION: usize = 2;

/// Rendered in place of CPA when a campaign has no conversions
pub const UNDEFINED_MARKER: &str = "";

/// Shown for an undefined CPA in console and log output
pub const UNDEFINED_TEXT: &str = "n/a";
