use crate::utils::config::{
    CTR_PRECISION, DEFAULT_TOP_K, MONEY_PRECISION, REPORT_COLUMNS, REQUIRED_COLUMNS,
    SUMMARY_SCHEMA_VERSION,
};

/// Display input and report column information
pub fn display_schema(show_details: bool) {
    println!("Ad Performance Aggregator Schema");
    println!("Summary Version: {}", SUMMARY_SCHEMA_VERSION);
    println!();
    println!("Required input columns: {}", REQUIRED_COLUMNS.join(", "));
    println!("Report columns:         {}", REPORT_COLUMNS.join(", "));

    if show_details {
        println!();
        println!("Input:");
        println!("  campaign_id: string   - Aggregation key, must not be empty");
        println!("  impressions: integer  - Non-negative, base 10");
        println!("  clicks: integer       - Non-negative, base 10");
        println!("  spend: decimal        - Non-negative, summed exactly");
        println!("  conversions: integer  - Non-negative, base 10");
        println!("  (column order is free, extra columns are ignored)");
        println!();
        println!("Reports (top {} by default):", DEFAULT_TOP_K);
        println!("  top<K>_ctr  - Highest CTR first, ties by campaign_id");
        println!("  top<K>_cpa  - Lowest CPA first, converting campaigns only");
        println!("  ctr         - {} fractional digits", CTR_PRECISION);
        println!("  spend, cpa  - {} fractional digits", MONEY_PRECISION);
        println!("  cpa         - empty when the campaign has no conversions");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Ad Performance Aggregator v{}", env!("CARGO_PKG_VERSION"));
    println!("Summary Schema: v{}", SUMMARY_SCHEMA_VERSION);
    println!();
    println!("Streaming aggregation and top-K ranking of ad performance CSV feeds.");
}
