//! Tunables shared by the importers and merge steps.

/// The default location placeholder for rows and offers with no furniture tag.
///
/// It is itself an invalid location, so such records surface in the manual
/// assignment queue.
pub const DEFAULT_UNASSIGNED_LOCATION: &str = "Sin asignar";

/// Configuration for imports and merges.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileConfig {
    /// `|delta|` above which a record counts as changed.
    ///
    /// Default: `0.01`.
    pub change_tolerance: f64,

    /// Prefix of codes synthesized for unmatched offers.
    ///
    /// Default: `"OF-"`.
    pub offer_code_prefix: String,

    /// Brand written on synthesized offer records.
    ///
    /// Default: `"Oferta"`.
    pub offer_brand: String,

    /// Location assigned when none is available.
    ///
    /// Default: [`DEFAULT_UNASSIGNED_LOCATION`].
    pub unassigned_location: String,

    /// Keep offer rows whose price parses to zero instead of dropping them.
    ///
    /// A zero price is indistinguishable from a price that failed to parse,
    /// so such rows are dropped by default and logged at `warn`.
    ///
    /// Default: `false`.
    pub keep_zero_price_offers: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            change_tolerance: 0.01,
            offer_code_prefix: "OF-".to_owned(),
            offer_brand: "Oferta".to_owned(),
            unassigned_location: DEFAULT_UNASSIGNED_LOCATION.to_owned(),
            keep_zero_price_offers: false,
        }
    }
}
