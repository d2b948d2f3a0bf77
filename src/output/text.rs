//! Console summary of the ranked reports.

use crate::aggregator::CampaignMetrics;
use crate::utils::config::UNDEFINED_TEXT;

const ID_WIDTH: usize = 24;

/// Render both rankings as boxed console tables
///
/// **Public** - printed by the aggregate command on `--summary`
pub fn render_text_summary(ctr_rows: &[&CampaignMetrics], cpa_rows: &[&CampaignMetrics]) -> String {
    let mut lines = Vec::new();

    push_table(&mut lines, "TOP CAMPAIGNS BY CTR (highest first)", ctr_rows);
    lines.push(String::new());
    push_table(&mut lines, "TOP CAMPAIGNS BY CPA (lowest first)", cpa_rows);

    lines.join("\n")
}

fn push_table(lines: &mut Vec<String>, title: &str, rows: &[&CampaignMetrics]) {
    lines.push(format!("  {}", title));
    lines.push(format!("  ┏{}┳{}┳{}┳{}┳{}┓", bar(ID_WIDTH + 2), bar(14), bar(10), bar(10), bar(12)));
    lines.push(format!(
        "  ┃ {:<w$} ┃ {:>12} ┃ {:>8} ┃ {:>8} ┃ {:>10} ┃",
        "Campaign",
        "Impressions",
        "Clicks",
        "CTR %",
        "CPA",
        w = ID_WIDTH
    ));
    lines.push(format!("  ┣{}╋{}╋{}╋{}╋{}┫", bar(ID_WIDTH + 2), bar(14), bar(10), bar(10), bar(12)));

    if rows.is_empty() {
        lines.push(format!("  ┃ {:<w$} ┃ {:>12} ┃ {:>8} ┃ {:>8} ┃ {:>10} ┃", "(none)", "", "", "", "", w = ID_WIDTH));
    }

    for m in rows {
        let cpa = m
            .cpa_checked()
            .map(|cpa| format!("{:.2}", cpa))
            .unwrap_or_else(|| UNDEFINED_TEXT.to_string());

        lines.push(format!(
            "  ┃ {:<w$} ┃ {:>12} ┃ {:>8} ┃ {:>8.3} ┃ {:>10} ┃",
            truncate(&m.campaign_id),
            m.total_impressions,
            m.total_clicks,
            m.ctr() * 100.0,
            cpa,
            w = ID_WIDTH
        ));
    }

    lines.push(format!("  ┗{}┻{}┻{}┻{}┻{}┛", bar(ID_WIDTH + 2), bar(14), bar(10), bar(10), bar(12)));
}

fn bar(width: usize) -> String {
    "━".repeat(width)
}

// Keep long ids from breaking the table layout
fn truncate(id: &str) -> String {
    let len = id.chars().count();
    if len <= ID_WIDTH {
        return id.to_string();
    }
    let tail: String = id.chars().skip(len - (ID_WIDTH - 3)).collect();
    format!("...{}", tail)
}
