//! Per-run campaign store.
//!
//! The store folds an unbounded row stream into one entry per distinct
//! campaign_id, so memory grows with the number of campaigns and not
//! with the number of rows.

use super::metrics::CampaignMetrics;
use super::ranking;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Accumulates campaign totals and answers ranked queries
///
/// **Public** - implemented by every aggregation backend
pub trait MetricsStore {
    /// Fold one observation into the entry for `campaign_id`
    ///
    /// Creates the entry on first sight. Performs no validation.
    fn add(&mut self, campaign_id: &str, impressions: i64, clicks: i64, spend: Decimal, conversions: i64);

    /// Up to `k` campaigns, highest CTR first
    fn top_k_by_ctr(&self, k: usize) -> Vec<&CampaignMetrics>;

    /// Up to `k` campaigns with conversions, lowest CPA first
    fn top_k_by_cpa(&self, k: usize) -> Vec<&CampaignMetrics>;

    /// Number of distinct campaigns held
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Map-backed store, the only production backend
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    campaigns: HashMap<String, CampaignMetrics>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the totals for one campaign
    pub fn get(&self, campaign_id: &str) -> Option<&CampaignMetrics> {
        self.campaigns.get(campaign_id)
    }

    /// Fold another store into this one
    ///
    /// Totals are summed field by field, so shards can be merged in any order.
    pub fn merge(&mut self, other: InMemoryStore) {
        for (campaign_id, theirs) in other.campaigns {
            self.campaigns
                .entry(campaign_id)
                .and_modify(|ours| ours.absorb(&theirs))
                .or_insert(theirs);
        }
    }
}

impl MetricsStore for InMemoryStore {
    fn add(&mut self, campaign_id: &str, impressions: i64, clicks: i64, spend: Decimal, conversions: i64) {
        // Only allocate the key on first observation
        match self.campaigns.get_mut(campaign_id) {
            Some(entry) => entry.accumulate(impressions, clicks, spend, conversions),
            None => {
                let mut entry = CampaignMetrics::new(campaign_id);
                entry.accumulate(impressions, clicks, spend, conversions);
                self.campaigns.insert(campaign_id.to_string(), entry);
            }
        }
    }

    fn top_k_by_ctr(&self, k: usize) -> Vec<&CampaignMetrics> {
        ranking::top_k_by_ctr(self.campaigns.values(), k)
    }

    fn top_k_by_cpa(&self, k: usize) -> Vec<&CampaignMetrics> {
        ranking::top_k_by_cpa(self.campaigns.values(), k)
    }

    fn len(&self) -> usize {
        self.campaigns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(units: i64) -> Decimal {
        Decimal::from(units)
    }

    #[test]
    fn test_add_and_count() {
        let mut store = InMemoryStore::new();
        assert!(store.is_empty());

        store.add("camp1", 100, 10, money(50), 5);
        assert_eq!(store.len(), 1);

        // Same campaign accumulates instead of adding an entry
        store.add("camp1", 200, 20, money(100), 10);
        assert_eq!(store.len(), 1);

        store.add("camp2", 300, 30, money(150), 15);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_accumulation() {
        let mut store = InMemoryStore::new();
        store.add("camp1", 1000, 50, money(100), 10);
        store.add("camp1", 500, 25, money(50), 5);

        let m = store.get("camp1").unwrap();
        assert_eq!(m.total_impressions, 1500);
        assert_eq!(m.total_clicks, 75);
        assert_eq!(m.total_spend, money(150));
        assert_eq!(m.total_conversions, 15);
    }

    #[test]
    fn test_merge_sums_shards() {
        let mut left = InMemoryStore::new();
        left.add("camp1", 1000, 50, money(100), 10);
        left.add("camp2", 10, 1, money(1), 0);

        let mut right = InMemoryStore::new();
        right.add("camp1", 500, 25, money(50), 5);
        right.add("camp3", 20, 2, money(2), 1);

        left.merge(right);

        assert_eq!(left.len(), 3);
        let camp1 = left.get("camp1").unwrap();
        assert_eq!(camp1.total_impressions, 1500);
        assert_eq!(camp1.total_clicks, 75);
        assert_eq!(camp1.total_spend, money(150));
        assert_eq!(camp1.total_conversions, 15);
        assert_eq!(left.get("camp3").unwrap().total_conversions, 1);
    }

    #[test]
    fn test_empty_store_rankings() {
        let store = InMemoryStore::new();
        assert!(store.top_k_by_ctr(10).is_empty());
        assert!(store.top_k_by_cpa(10).is_empty());
    }
}
