//! Property-based tests for the reconciliation engine.
//!
//! Verifies idempotence of the price merge, the code-normalization fixed
//! point and the delta / percent-change invariants over `proptest`-generated
//! reference sets, update lists and offer lists with controlled code and name
//! overlap.
#![allow(clippy::expect_used)]

use pricesync_core::{
    OfferPair, PercentChange, ProductRecord, ReconcileConfig, UpdatePair, integrate_offers,
    merge_prices, normalize_code_str,
};
use proptest::prelude::*;

/// Small shared code pool so updates hit references often.
fn code_strategy() -> impl Strategy<Value = String> {
    (0u8..4, 1u32..40).prop_map(|(zeros, n)| format!("{}{n}", "0".repeat(zeros as usize)))
}

fn price_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), (0u32..500_000).prop_map(|c| f64::from(c) / 100.0)]
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Amoxicilina",
        "Ibuprofeno",
        "Paracetamol",
        "Gasas",
        "Alcohol en gel",
        "Crema",
    ])
    .prop_map(str::to_owned)
}

fn record_strategy() -> impl Strategy<Value = ProductRecord> {
    (code_strategy(), name_strategy(), price_strategy()).prop_map(|(code, name, price)| {
        ProductRecord::new(normalize_code_str(&code), name, "Lab", "A1", price)
    })
}

fn update_strategy() -> impl Strategy<Value = UpdatePair> {
    (code_strategy(), price_strategy()).prop_map(|(code, new_price)| UpdatePair { code, new_price })
}

fn offer_strategy() -> impl Strategy<Value = OfferPair> {
    (name_strategy(), 1u32..100_000).prop_map(|(name, cents)| OfferPair {
        product_name: name,
        price: f64::from(cents) / 100.0,
        location: None,
    })
}

fn assert_consistent(record: &ProductRecord) {
    assert_eq!(
        record.delta(),
        record.updated_price() - record.previous_price(),
        "delta must equal updated - previous for {record:?}"
    );
    assert!(record.previous_price() >= 0.0);
    assert!(record.updated_price() >= 0.0);
    if record.previous_price() == 0.0 {
        assert_eq!(record.percent_change(), PercentChange::NotApplicable);
        assert_eq!(record.percent_change().to_string(), "N/A");
    }
}

proptest! {
    #[test]
    fn price_merge_is_idempotent(
        records in prop::collection::vec(record_strategy(), 0..30),
        updates in prop::collection::vec(update_strategy(), 0..30),
    ) {
        let config = ReconcileConfig::default();
        let once = merge_prices(&records, &updates, &config);
        let twice = merge_prices(&once.records, &updates, &config);
        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn price_merge_preserves_order_and_length(
        records in prop::collection::vec(record_strategy(), 0..30),
        updates in prop::collection::vec(update_strategy(), 0..30),
    ) {
        let out = merge_prices(&records, &updates, &ReconcileConfig::default());
        prop_assert_eq!(out.records.len(), records.len());
        prop_assert_eq!(out.stats.total, records.len());
        for (before, after) in records.iter().zip(&out.records) {
            prop_assert_eq!(&before.code, &after.code);
            prop_assert_eq!(before.previous_price(), after.previous_price());
        }
    }

    #[test]
    fn merged_records_are_consistent(
        records in prop::collection::vec(record_strategy(), 0..30),
        updates in prop::collection::vec(update_strategy(), 0..30),
        offers in prop::collection::vec(offer_strategy(), 0..10),
    ) {
        let config = ReconcileConfig::default();
        let merged = merge_prices(&records, &updates, &config);
        merged.records.iter().for_each(assert_consistent);
        let integrated = integrate_offers(&merged.records, &offers, &config);
        integrated.records.iter().for_each(assert_consistent);
        prop_assert_eq!(
            integrated.stats.integrated,
            integrated.stats.new_products + integrated.stats.updated
        );
        prop_assert_eq!(integrated.stats.integrated, offers.len());
    }

    #[test]
    fn changed_count_respects_tolerance(
        records in prop::collection::vec(record_strategy(), 0..30),
        updates in prop::collection::vec(update_strategy(), 0..30),
    ) {
        let config = ReconcileConfig::default();
        let out = merge_prices(&records, &updates, &config);
        let expected = out
            .records
            .iter()
            .filter(|r| r.delta().abs() > config.change_tolerance)
            .count();
        prop_assert_eq!(out.stats.changed, expected);
    }

    #[test]
    fn code_normalization_is_a_fixed_point(raw in "[ 0-9A-Za-z-]{0,12}") {
        let once = normalize_code_str(&raw);
        prop_assert_eq!(normalize_code_str(&once), once);
    }

    #[test]
    fn synthesized_offer_codes_are_unique(
        records in prop::collection::vec(record_strategy(), 0..10),
        offers in prop::collection::vec(offer_strategy(), 0..20),
    ) {
        let out = integrate_offers(&records, &offers, &ReconcileConfig::default());
        let mut synthesized: Vec<&str> = out.records[records.len()..]
            .iter()
            .map(|r| r.code.as_str())
            .collect();
        let count = synthesized.len();
        synthesized.sort_unstable();
        synthesized.dedup();
        prop_assert_eq!(synthesized.len(), count);
    }
}
