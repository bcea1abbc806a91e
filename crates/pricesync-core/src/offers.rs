/// Merges promotional offers onto records by product name.
///
/// Offer sheets carry no codes, so offers are matched on the record
/// description, lower-cased and trimmed. Matched records take the offer
/// price; unmatched offers become new records with a synthesized code.
use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::config::ReconcileConfig;
use crate::record::{OfferPair, ProductRecord};

/// Summary of an offer integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferStats {
    /// Number of records in the output.
    pub total: usize,
    /// `new_products + updated`.
    pub integrated: usize,
    /// Offers that produced a new record.
    pub new_products: usize,
    /// Offers applied to an existing record.
    pub updated: usize,
}

/// Result of [`integrate_offers`].
#[derive(Debug, Clone, PartialEq)]
pub struct OfferIntegrationOutput {
    /// Original records (with offer prices applied) followed by new records.
    pub records: Vec<ProductRecord>,
    /// Summary statistics.
    pub stats: OfferStats,
}

/// The match key of a product name.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Hands out placeholder codes (`OF-1`, `OF-2`, …) that no record uses yet.
struct OfferCodes<'a> {
    prefix: &'a str,
    next: usize,
    taken: HashSet<String>,
}

impl<'a> OfferCodes<'a> {
    fn new(prefix: &'a str, records: &[ProductRecord]) -> Self {
        Self {
            prefix,
            next: 1,
            taken: records.iter().map(|r| r.code.clone()).collect(),
        }
    }

    fn issue(&mut self) -> String {
        loop {
            let code = format!("{}{}", self.prefix, self.next);
            self.next += 1;
            if self.taken.insert(code.clone()) {
                return code;
            }
        }
    }
}

/// Integrates `offers` into `records`.
///
/// The name index maps each input record's [`name_key`] to its position; the
/// first record with a given name wins and later duplicates cannot be
/// matched. For each offer:
///
/// - a matched record takes the offer price, `delta`/`percent_change` are
///   recomputed against its previous price and `is_offer` is set;
/// - an unmatched offer becomes a new record with a fresh placeholder code,
///   [`ReconcileConfig::offer_brand`] as brand, the offer location (or the
///   unassigned placeholder), a previous price of zero and the offer price
///   as updated price.
///
/// Synthesized records are never indexed: two unmatched offers sharing a name
/// produce two new records.
pub fn integrate_offers(
    records: &[ProductRecord],
    offers: &[OfferPair],
    config: &ReconcileConfig,
) -> OfferIntegrationOutput {
    let mut output: Vec<ProductRecord> = records.to_vec();
    let mut index: HashMap<String, usize> = HashMap::new();
    for (pos, record) in output.iter().enumerate() {
        let key = name_key(&record.description);
        if key.is_empty() {
            continue;
        }
        if index.contains_key(&key) {
            tracing::warn!(
                description = %record.description,
                "duplicate description shadowed for offer matching"
            );
            continue;
        }
        index.insert(key, pos);
    }

    let mut codes = OfferCodes::new(&config.offer_code_prefix, records);
    let mut stats = OfferStats::default();

    for offer in offers {
        let key = name_key(&offer.product_name);
        match index.get(&key) {
            Some(&pos) => {
                let mut updated = output[pos].with_updated_price(offer.price);
                updated.is_offer = true;
                output[pos] = updated;
                stats.updated += 1;
            }
            None => {
                let location = offer
                    .location
                    .clone()
                    .unwrap_or_else(|| config.unassigned_location.clone());
                let mut created = ProductRecord::new(
                    codes.issue(),
                    offer.product_name.trim(),
                    config.offer_brand.as_str(),
                    location,
                    0.0,
                )
                .with_updated_price(offer.price);
                created.is_offer = true;
                output.push(created);
                stats.new_products += 1;
            }
        }
    }

    stats.integrated = stats.new_products + stats.updated;
    stats.total = output.len();
    tracing::debug!(
        total = stats.total,
        updated = stats.updated,
        new_products = stats.new_products,
        "offers integrated"
    );

    OfferIntegrationOutput {
        records: output,
        stats,
    }
}
