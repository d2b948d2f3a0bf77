//! Deterministic top-K selection over campaign totals.
//!
//! Both orderings are total: equal rates fall back to `campaign_id`
//! ascending. CTR compares with `f64::total_cmp`; CPA compares the exact
//! decimal quotient.

use super::metrics::CampaignMetrics;
use log::debug;
use std::cmp::Ordering;

/// Highest CTR first, ties by campaign_id ascending
pub fn by_ctr_desc(a: &CampaignMetrics, b: &CampaignMetrics) -> Ordering {
    b.ctr()
        .total_cmp(&a.ctr())
        .then_with(|| a.campaign_id.cmp(&b.campaign_id))
}

/// Lowest CPA first, ties by campaign_id ascending
pub fn by_cpa_asc(a: &CampaignMetrics, b: &CampaignMetrics) -> Ordering {
    a.cpa_exact()
        .cmp(&b.cpa_exact())
        .then_with(|| a.campaign_id.cmp(&b.campaign_id))
}

/// Top `k` campaigns by descending CTR
///
/// **Public** - used by store implementations
///
/// # Arguments
/// * `campaigns` - Every campaign held by the store
/// * `k` - Maximum number of entries to return (0 yields an empty result)
pub fn top_k_by_ctr<'a, I>(campaigns: I, k: usize) -> Vec<&'a CampaignMetrics>
where
    I: IntoIterator<Item = &'a CampaignMetrics>,
{
    rank(campaigns.into_iter().collect(), k, by_ctr_desc)
}

/// Top `k` campaigns by ascending CPA
///
/// **Public** - used by store implementations
///
/// Campaigns without conversions have no CPA and are never returned.
pub fn top_k_by_cpa<'a, I>(campaigns: I, k: usize) -> Vec<&'a CampaignMetrics>
where
    I: IntoIterator<Item = &'a CampaignMetrics>,
{
    let eligible: Vec<&CampaignMetrics> = campaigns
        .into_iter()
        .filter(|m| m.total_conversions > 0)
        .collect();
    rank(eligible, k, by_cpa_asc)
}

/// Sort the full eligible set and keep the first `k`
///
/// **Private** - shared by both rankings
fn rank<'a>(
    mut eligible: Vec<&'a CampaignMetrics>,
    k: usize,
    order: fn(&CampaignMetrics, &CampaignMetrics) -> Ordering,
) -> Vec<&'a CampaignMetrics> {
    if k == 0 {
        return Vec::new();
    }

    debug!("Ranking {} eligible campaigns, keeping {}", eligible.len(), k);

    eligible.sort_by(|a, b| order(a, b));
    eligible.truncate(k);
    eligible
}
