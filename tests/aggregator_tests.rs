use ad_performance_aggregator::aggregator::{CampaignMetrics, InMemoryStore, MetricsStore};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

fn money(units: i64) -> Decimal {
    Decimal::from(units)
}

fn ids(ranked: &[&CampaignMetrics]) -> Vec<String> {
    ranked.iter().map(|m| m.campaign_id.clone()).collect()
}

#[test]
fn test_accumulation_is_order_independent() {
    let rows = [
        ("camp1", 1000, 50, Decimal::new(10010, 2), 10),
        ("camp2", 10, 1, Decimal::new(1, 1), 0),
        ("camp1", 500, 25, Decimal::new(4990, 2), 5),
    ];

    let mut forward = InMemoryStore::new();
    for (id, imp, clicks, spend, conv) in rows {
        forward.add(id, imp, clicks, spend, conv);
    }

    let mut backward = InMemoryStore::new();
    for (id, imp, clicks, spend, conv) in rows.iter().rev().copied() {
        backward.add(id, imp, clicks, spend, conv);
    }

    let camp1 = forward.get("camp1").unwrap();
    assert_eq!(camp1.total_impressions, 1500);
    assert_eq!(camp1.total_clicks, 75);
    assert_eq!(camp1.total_spend, money(150));
    assert_eq!(camp1.total_conversions, 15);

    assert_eq!(forward.get("camp1"), backward.get("camp1"));
    assert_eq!(forward.get("camp2"), backward.get("camp2"));
}

#[test]
fn test_top_k_by_ctr_ranking() {
    let mut store = InMemoryStore::new();
    store.add("low", 1000, 10, money(0), 0);
    store.add("high", 1000, 100, money(0), 0);
    store.add("mid", 1000, 50, money(0), 0);

    assert_eq!(ids(&store.top_k_by_ctr(10)), vec!["high", "mid", "low"]);
}

#[test]
fn test_top_k_by_ctr_limit() {
    let mut store = InMemoryStore::new();
    // CTRs 0.05, 0.04, 0.03, 0.02, 0.01
    for (i, id) in ["e", "d", "c", "b", "a"].iter().enumerate() {
        store.add(id, 1000, 50 - 10 * i as i64, money(0), 0);
    }

    let top = store.top_k_by_ctr(2);
    assert_eq!(ids(&top), vec!["e", "d"]);
    assert_eq!(top[0].ctr(), 0.05);
    assert_eq!(top[1].ctr(), 0.04);
}

#[test]
fn test_k_larger_than_store() {
    let mut store = InMemoryStore::new();
    store.add("a", 10, 1, money(1), 1);
    store.add("b", 10, 2, money(1), 1);

    assert_eq!(store.top_k_by_ctr(100).len(), 2);
    assert_eq!(store.top_k_by_cpa(100).len(), 2);
}

#[test]
fn test_zero_k_is_empty() {
    let mut store = InMemoryStore::new();
    store.add("a", 10, 1, money(1), 1);

    assert!(store.top_k_by_ctr(0).is_empty());
    assert!(store.top_k_by_cpa(0).is_empty());
}

#[test]
fn test_top_k_by_cpa_ranking() {
    let mut store = InMemoryStore::new();
    store.add("expensive", 0, 0, money(1000), 10); // CPA = 100
    store.add("cheap", 0, 0, money(100), 10); // CPA = 10
    store.add("mid", 0, 0, money(500), 10); // CPA = 50

    assert_eq!(ids(&store.top_k_by_cpa(10)), vec!["cheap", "mid", "expensive"]);
}

#[test]
fn test_top_k_by_cpa_excludes_zero_conversions() {
    let mut store = InMemoryStore::new();
    store.add("a", 0, 0, money(100), 10);
    store.add("b", 0, 0, money(200), 0);

    assert_eq!(ids(&store.top_k_by_cpa(10)), vec!["a"]);
    // Still present in the CTR ranking
    assert_eq!(store.top_k_by_ctr(10).len(), 2);
}

#[test]
fn test_equal_rates_order_by_id() {
    let mut store = InMemoryStore::new();
    store.add("camp2", 2000, 200, money(200), 20);
    store.add("camp1", 1000, 100, money(500), 50);
    store.add("camp3", 4000, 400, money(40), 4);

    // All three have CTR 0.1 and CPA 10
    assert_eq!(ids(&store.top_k_by_ctr(3)), vec!["camp1", "camp2", "camp3"]);
    assert_eq!(ids(&store.top_k_by_cpa(2)), vec!["camp1", "camp2"]);
}

#[test]
fn test_zero_denominators() {
    let mut store = InMemoryStore::new();
    store.add("idle", 0, 0, money(0), 0);

    let idle = store.get("idle").unwrap();
    assert_eq!(idle.ctr(), 0.0);
    assert_eq!(idle.cpa(), 0.0);
    assert!(store.top_k_by_cpa(10).is_empty());
    assert_eq!(ids(&store.top_k_by_ctr(10)), vec!["idle"]);
}

#[test]
fn test_store_as_trait_object() {
    let mut store = InMemoryStore::new();
    {
        let dynamic: &mut dyn MetricsStore = &mut store;
        dynamic.add("camp1", 100, 10, money(50), 5);
        dynamic.add("camp1", 100, 10, money(50), 5);
        assert_eq!(dynamic.len(), 1);
    }
    assert_eq!(store.get("camp1").unwrap().total_clicks, 20);
}

#[test]
fn test_fractional_spend_sum_is_exact_in_any_order() {
    let amounts = [Decimal::new(1, 1), Decimal::new(2, 1), Decimal::new(3, 1)];
    let orders = [[0, 1, 2], [2, 1, 0], [1, 2, 0]];

    let totals: Vec<Decimal> = orders
        .iter()
        .map(|order| {
            let mut store = InMemoryStore::new();
            for &i in order {
                store.add("camp1", 1, 0, amounts[i], 1);
            }
            store.get("camp1").unwrap().total_spend
        })
        .collect();

    assert_eq!(totals, vec![Decimal::new(6, 1); 3]);
}
