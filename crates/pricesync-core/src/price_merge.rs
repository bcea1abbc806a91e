/// Applies price-update pairs onto reference records by code.
///
/// The merge is a pure function: it reads the current records and returns a
/// new sequence in the same order. Applying the same updates twice gives the
/// same result as applying them once, since the new price replaces the
/// current one instead of accumulating.
use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::code::normalize_code_str;
use crate::config::ReconcileConfig;
use crate::record::{ProductRecord, UpdatePair};

/// Summary of a price merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PriceMergeStats {
    /// Number of records in the output.
    pub total: usize,
    /// Records whose `|delta|` exceeds the change tolerance.
    pub changed: usize,
}

/// Result of [`merge_prices`].
#[derive(Debug, Clone, PartialEq)]
pub struct PriceMergeOutput {
    /// Records in their original order.
    pub records: Vec<ProductRecord>,
    /// Summary statistics.
    pub stats: PriceMergeStats,
}

/// Builds the code → price lookup. Later pairs overwrite earlier ones.
fn build_price_index(updates: &[UpdatePair]) -> HashMap<String, f64> {
    updates
        .iter()
        .map(|u| (normalize_code_str(&u.code), u.new_price))
        .collect()
}

/// Merges `updates` onto `records`.
///
/// Every record whose normalized code has an update gets that price as its
/// `updated_price` (and loses its offer flag, since the price now comes from
/// the update list). Records without an update keep their current price; for
/// freshly imported records that is the previous price. `delta` and
/// `percent_change` are recomputed for every record.
///
/// A record counts as changed only when `|delta|` exceeds
/// [`ReconcileConfig::change_tolerance`]; its `delta` still holds the exact
/// difference.
pub fn merge_prices(
    records: &[ProductRecord],
    updates: &[UpdatePair],
    config: &ReconcileConfig,
) -> PriceMergeOutput {
    let index = build_price_index(updates);
    let mut matched_codes: HashSet<&str> = HashSet::new();

    let merged: Vec<ProductRecord> = records
        .iter()
        .map(|record| {
            let code = normalize_code_str(&record.code);
            match index.get_key_value(&code) {
                Some((key, &price)) => {
                    matched_codes.insert(key.as_str());
                    let mut updated = record.with_updated_price(price);
                    updated.is_offer = false;
                    updated
                }
                None => record.with_updated_price(record.updated_price()),
            }
        })
        .collect();

    let stats = PriceMergeStats {
        total: merged.len(),
        changed: merged
            .iter()
            .filter(|r| r.is_changed(config.change_tolerance))
            .count(),
    };

    tracing::debug!(
        total = stats.total,
        changed = stats.changed,
        updates = index.len(),
        unmatched_updates = index.len() - matched_codes.len(),
        "price updates merged"
    );

    PriceMergeOutput {
        records: merged,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PercentChange;

    fn record(code: &str, price: f64) -> ProductRecord {
        ProductRecord::new(code, format!("item {code}"), "", "A1", price)
    }

    fn update(code: &str, price: f64) -> UpdatePair {
        UpdatePair {
            code: code.to_owned(),
            new_price: price,
        }
    }

    #[test]
    fn update_scenario_computes_delta_and_percent() {
        let out = merge_prices(
            &[record("57", 1500.0)],
            &[update("57", 1800.0)],
            &ReconcileConfig::default(),
        );
        let r = &out.records[0];
        assert_eq!(r.updated_price(), 1800.0);
        assert_eq!(r.delta(), 300.0);
        assert_eq!(r.percent_change().to_string(), "20.00%");
        assert_eq!(out.stats, PriceMergeStats { total: 1, changed: 1 });
    }

    #[test]
    fn records_without_update_keep_their_price() {
        let out = merge_prices(
            &[record("1", 100.0), record("2", 200.0)],
            &[update("2", 150.0)],
            &ReconcileConfig::default(),
        );
        assert_eq!(out.records[0].updated_price(), 100.0);
        assert_eq!(out.records[0].delta(), 0.0);
        assert_eq!(
            out.records[0].percent_change(),
            PercentChange::Percent(0.0)
        );
        assert_eq!(out.records[1].updated_price(), 150.0);
        assert_eq!(out.records[1].percent_change().to_string(), "-25.00%");
        assert_eq!(out.stats.changed, 1);
    }

    #[test]
    fn update_codes_are_normalized() {
        let out = merge_prices(
            &[record("57", 10.0)],
            &[update("0057", 12.0)],
            &ReconcileConfig::default(),
        );
        assert_eq!(out.records[0].updated_price(), 12.0);
    }

    #[test]
    fn duplicate_update_codes_last_one_wins() {
        let out = merge_prices(
            &[record("57", 10.0)],
            &[update("57", 11.0), update("57", 13.0)],
            &ReconcileConfig::default(),
        );
        assert_eq!(out.records[0].updated_price(), 13.0);
    }

    #[test]
    fn duplicate_reference_codes_all_receive_the_update() {
        let out = merge_prices(
            &[record("57", 10.0), record("57", 10.0)],
            &[update("57", 20.0)],
            &ReconcileConfig::default(),
        );
        assert!(out.records.iter().all(|r| r.updated_price() == 20.0));
    }

    #[test]
    fn sub_cent_differences_are_not_counted() {
        let out = merge_prices(
            &[record("1", 10.0)],
            &[update("1", 10.005)],
            &ReconcileConfig::default(),
        );
        assert_eq!(out.stats.changed, 0);
        assert!((out.records[0].delta() - 0.005).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs_yield_empty_result() {
        let out = merge_prices(&[], &[], &ReconcileConfig::default());
        assert!(out.records.is_empty());
        assert_eq!(out.stats, PriceMergeStats::default());
    }

    #[test]
    fn merging_twice_is_idempotent() {
        let records = vec![record("1", 100.0), record("2", 0.0), record("3", 50.0)];
        let updates = vec![update("1", 120.0), update("2", 30.0), update("9", 1.0)];
        let config = ReconcileConfig::default();
        let once = merge_prices(&records, &updates, &config);
        let twice = merge_prices(&once.records, &updates, &config);
        assert_eq!(once, twice);
    }

    #[test]
    fn input_records_are_not_mutated() {
        let records = vec![record("1", 100.0)];
        let before = records.clone();
        let _out = merge_prices(&records, &[update("1", 5.0)], &ReconcileConfig::default());
        assert_eq!(records, before);
    }

    #[test]
    fn update_clears_offer_flag() {
        let mut offered = record("1", 100.0).with_updated_price(80.0);
        offered.is_offer = true;
        let out = merge_prices(&[offered], &[update("1", 110.0)], &ReconcileConfig::default());
        assert!(!out.records[0].is_offer);
    }
}
