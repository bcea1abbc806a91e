#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod cell;
pub mod code;
pub mod columns;
pub mod config;
pub mod dataset;
pub mod error;
pub mod header;
pub mod import;
pub mod location;
pub mod offers;
pub mod price;
pub mod price_merge;
pub mod record;

pub use cell::{Cell, CellMatrix, matrix};
pub use code::{normalize_code, normalize_code_str};
pub use columns::{
    ColumnMap, ColumnMatcher, ColumnRole, OfferColumns, identify_brand_column,
    identify_code_column, identify_column, identify_description_column,
    identify_location_column, identify_price_column,
};
pub use config::{DEFAULT_UNASSIGNED_LOCATION, ReconcileConfig};
pub use dataset::Dataset;
pub use error::{AssignError, ImportError};
pub use header::normalize_header;
pub use import::{import_offers, import_reference, import_updates};
pub use location::{
    LocationGroup, LocationStatus, assign_location, group_by_location, is_location_valid,
    location_report, unassigned,
};
pub use offers::{OfferIntegrationOutput, OfferStats, integrate_offers};
pub use price::{parse_offer_price, parse_price};
pub use price_merge::{PriceMergeOutput, PriceMergeStats, merge_prices};
pub use record::{OfferPair, PercentChange, ProductRecord, UpdatePair};

/// Returns the current version of the pricesync-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
