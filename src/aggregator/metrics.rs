//! Per-campaign running totals and derived rates.
//!
//! Totals are accumulated during the streaming pass; CTR and CPA are
//! computed on demand and never stored. Spend is summed as an exact
//! decimal so the totals do not depend on row order.

use crate::utils::config::UNDEFINED_TEXT;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Running totals for a single campaign_id
///
/// **Public** - returned by store queries and consumed by report writers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignMetrics {
    /// Aggregation key
    pub campaign_id: String,

    /// Sum of impressions over every contributing row
    pub total_impressions: i64,

    /// Sum of clicks over every contributing row
    pub total_clicks: i64,

    /// Exact sum of spend over every contributing row
    pub total_spend: Decimal,

    /// Sum of conversions over every contributing row
    pub total_conversions: i64,
}

impl CampaignMetrics {
    /// Create an empty entry for a newly observed campaign
    pub fn new(campaign_id: impl Into<String>) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            total_impressions: 0,
            total_clicks: 0,
            total_spend: Decimal::ZERO,
            total_conversions: 0,
        }
    }

    /// Fold one observation into the totals
    ///
    /// Every total saturates at its type's maximum rather than wrapping.
    pub fn accumulate(&mut self, impressions: i64, clicks: i64, spend: Decimal, conversions: i64) {
        self.total_impressions = self.total_impressions.saturating_add(impressions);
        self.total_clicks = self.total_clicks.saturating_add(clicks);
        self.total_spend = self.total_spend.saturating_add(spend);
        self.total_conversions = self.total_conversions.saturating_add(conversions);
    }

    /// Fold another campaign's totals into this one
    pub fn absorb(&mut self, other: &CampaignMetrics) {
        self.accumulate(
            other.total_impressions,
            other.total_clicks,
            other.total_spend,
            other.total_conversions,
        );
    }

    /// Total spend as a float, for rendering
    pub fn spend(&self) -> f64 {
        self.total_spend.to_f64().unwrap_or(f64::MAX)
    }

    /// Click-through rate (clicks / impressions), 0 without impressions
    pub fn ctr(&self) -> f64 {
        if self.total_impressions == 0 {
            return 0.0;
        }
        self.total_clicks as f64 / self.total_impressions as f64
    }

    /// Cost per acquisition (spend / conversions), 0 without conversions
    ///
    /// Use [`CampaignMetrics::cpa_checked`] when zero-conversion campaigns
    /// must be told apart from a genuine zero CPA.
    pub fn cpa(&self) -> f64 {
        self.cpa_checked().unwrap_or(0.0)
    }

    /// Cost per acquisition, `None` when it is undefined
    pub fn cpa_checked(&self) -> Option<f64> {
        self.cpa_exact().and_then(|cpa| cpa.to_f64())
    }

    /// Cost per acquisition as a decimal quotient, used for ranking
    pub fn cpa_exact(&self) -> Option<Decimal> {
        if self.total_conversions == 0 {
            return None;
        }
        self.total_spend.checked_div(Decimal::from(self.total_conversions))
    }
}

impl fmt::Display for CampaignMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cpa = match self.cpa_checked() {
            Some(cpa) => format!("{:.2}", cpa),
            None => UNDEFINED_TEXT.to_string(),
        };

        write!(
            f,
            "campaign={} imp={} click={} spend={:.2} conv={} ctr={:.6} cpa={}",
            self.campaign_id,
            self.total_impressions,
            self.total_clicks,
            self.spend(),
            self.total_conversions,
            self.ctr(),
            cpa
        )
    }
}
