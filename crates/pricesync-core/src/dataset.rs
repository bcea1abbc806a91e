/// Immutable dataset snapshots threaded through the reconciliation steps.
///
/// A [`Dataset`] is never modified. Each step borrows the current snapshot and
/// returns the next one together with its statistics; earlier versions stay
/// valid for undo or comparison.
use serde::Serialize;

use crate::cell::CellMatrix;
use crate::config::ReconcileConfig;
use crate::error::{AssignError, ImportError};
use crate::import::{import_offers, import_reference, import_updates};
use crate::location::{
    LocationGroup, LocationStatus, group_by_location, location_report, unassigned,
};
use crate::offers::{OfferStats, integrate_offers};
use crate::price_merge::{PriceMergeStats, merge_prices};
use crate::record::{OfferPair, ProductRecord, UpdatePair};

/// One version of the reconciled product list.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<ProductRecord>,
}

impl Dataset {
    /// Wraps already-built records.
    pub fn new(records: Vec<ProductRecord>) -> Self {
        Self { records }
    }

    /// Imports a reference catalogue sheet as the first dataset version.
    ///
    /// # Errors
    ///
    /// See [`import_reference`].
    pub fn from_reference(
        matrix: &CellMatrix,
        config: &ReconcileConfig,
    ) -> Result<Self, ImportError> {
        import_reference(matrix, config).map(Self::new)
    }

    /// The records, in order.
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    /// Consumes the snapshot and returns its records.
    pub fn into_records(self) -> Vec<ProductRecord> {
        self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Applies price-update pairs. See [`merge_prices`].
    #[must_use]
    pub fn apply_updates(
        &self,
        updates: &[UpdatePair],
        config: &ReconcileConfig,
    ) -> (Self, PriceMergeStats) {
        let out = merge_prices(&self.records, updates, config);
        (Self::new(out.records), out.stats)
    }

    /// Imports a price-update sheet and applies it.
    ///
    /// # Errors
    ///
    /// See [`import_updates`]. The current snapshot is unaffected on error.
    pub fn apply_update_sheet(
        &self,
        matrix: &CellMatrix,
        config: &ReconcileConfig,
    ) -> Result<(Self, PriceMergeStats), ImportError> {
        let updates = import_updates(matrix)?;
        Ok(self.apply_updates(&updates, config))
    }

    /// Integrates offer pairs. See [`integrate_offers`].
    #[must_use]
    pub fn integrate_offers(
        &self,
        offers: &[OfferPair],
        config: &ReconcileConfig,
    ) -> (Self, OfferStats) {
        let out = integrate_offers(&self.records, offers, config);
        (Self::new(out.records), out.stats)
    }

    /// Imports an offer sheet and integrates it.
    ///
    /// # Errors
    ///
    /// See [`import_offers`]. The current snapshot is unaffected on error.
    pub fn integrate_offer_sheet(
        &self,
        matrix: &CellMatrix,
        config: &ReconcileConfig,
    ) -> Result<(Self, OfferStats), ImportError> {
        let offers = import_offers(matrix, config)?;
        Ok(self.integrate_offers(&offers, config))
    }

    /// Assigns a location to every record with `code`.
    ///
    /// # Errors
    ///
    /// [`AssignError::UnknownCode`] when no record carries `code`.
    pub fn assign_location(&self, code: &str, location: &str) -> Result<(Self, usize), AssignError> {
        crate::location::assign_location(&self.records, code, location)
            .map(|(records, touched)| (Self::new(records), touched))
    }

    /// Records grouped by valid location.
    pub fn groups(&self) -> Vec<LocationGroup> {
        group_by_location(&self.records)
    }

    /// Validity and record count per location tag.
    pub fn location_report(&self) -> Vec<LocationStatus> {
        location_report(&self.records)
    }

    /// Records waiting for a manual location assignment.
    pub fn unassigned(&self) -> Vec<&ProductRecord> {
        unassigned(&self.records)
    }

    /// Records whose `|delta|` exceeds `config.change_tolerance`.
    pub fn changed(&self, config: &ReconcileConfig) -> Vec<&ProductRecord> {
        self.records
            .iter()
            .filter(|r| r.is_changed(config.change_tolerance))
            .collect()
    }
}

impl From<Vec<ProductRecord>> for Dataset {
    fn from(records: Vec<ProductRecord>) -> Self {
        Self::new(records)
    }
}
