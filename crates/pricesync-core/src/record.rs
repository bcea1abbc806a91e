/// Canonical product records and the ephemeral pairs merged onto them.
///
/// A [`ProductRecord`] keeps its price pair private so that `delta` and
/// `percent_change` can only be produced by recomputation from the current
/// `(previous_price, updated_price)` pair. Every price change goes through
/// [`ProductRecord::with_updated_price`], which returns a new record.
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// PercentChange
// ---------------------------------------------------------------------------

/// Relative price change of a record, rendered as `"20.00%"` or `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PercentChange {
    /// No meaningful percentage: the previous price is zero, or the record has
    /// not been reconciled yet.
    #[default]
    NotApplicable,
    /// `delta / previous_price × 100`.
    Percent(f64),
}

impl PercentChange {
    /// The sentinel rendering of [`PercentChange::NotApplicable`].
    pub const NOT_APPLICABLE: &'static str = "N/A";

    /// Computes the change from `previous` to `updated`.
    pub fn between(previous: f64, updated: f64) -> Self {
        if previous == 0.0 {
            Self::NotApplicable
        } else {
            Self::Percent((updated - previous) / previous * 100.0)
        }
    }
}

impl std::fmt::Display for PercentChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotApplicable => f.write_str(Self::NOT_APPLICABLE),
            Self::Percent(p) => {
                let rounded = format!("{p:.2}");
                // A change that rounds to zero from below prints as "-0.00".
                let shown = rounded
                    .strip_prefix('-')
                    .filter(|r| *r == "0.00")
                    .unwrap_or(rounded.as_str());
                write!(f, "{shown}%")
            }
        }
    }
}

impl Serialize for PercentChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// ProductRecord
// ---------------------------------------------------------------------------

/// One reconciled product row.
///
/// Serialization follows the fixed export field order
/// [`ProductRecord::EXPORT_FIELDS`] so spreadsheet and JSON writers render
/// columns consistently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Normalized product code; empty for unidentified legacy rows.
    pub code: String,
    /// Drug or item name.
    pub description: String,
    previous_price: f64,
    /// Furniture / storage location tag.
    pub location: String,
    /// Brand or laboratory.
    pub brand: String,
    delta: f64,
    percent_change: PercentChange,
    /// True when the current price came from an offer list.
    pub is_offer: bool,
    updated_price: f64,
}

impl ProductRecord {
    /// Column names of the export layout, in order.
    pub const EXPORT_FIELDS: [&'static str; 9] = [
        "code",
        "description",
        "previousPrice",
        "location",
        "brand",
        "delta",
        "percentChange",
        "isOffer",
        "updatedPrice",
    ];

    /// Creates a freshly imported record.
    ///
    /// `updated_price` starts equal to `previous_price`, `delta` is zero and
    /// `percent_change` is [`PercentChange::NotApplicable`] until the record
    /// is reconciled. Negative or non-finite prices are clamped to zero.
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        brand: impl Into<String>,
        location: impl Into<String>,
        previous_price: f64,
    ) -> Self {
        let previous_price = non_negative(previous_price);
        Self {
            code: code.into(),
            description: description.into(),
            previous_price,
            location: location.into(),
            brand: brand.into(),
            delta: 0.0,
            percent_change: PercentChange::NotApplicable,
            is_offer: false,
            updated_price: previous_price,
        }
    }

    /// Returns a copy with `updated_price` replaced and `delta` /
    /// `percent_change` recomputed.
    #[must_use]
    pub fn with_updated_price(&self, updated_price: f64) -> Self {
        let updated_price = non_negative(updated_price);
        Self {
            updated_price,
            delta: updated_price - self.previous_price,
            percent_change: PercentChange::between(self.previous_price, updated_price),
            ..self.clone()
        }
    }

    /// Returns a copy with the location replaced.
    #[must_use]
    pub fn with_location(&self, location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..self.clone()
        }
    }

    /// Price from the reference list.
    pub fn previous_price(&self) -> f64 {
        self.previous_price
    }

    /// Current price after merges.
    pub fn updated_price(&self) -> f64 {
        self.updated_price
    }

    /// `updated_price - previous_price`.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Relative change against `previous_price`.
    pub fn percent_change(&self) -> PercentChange {
        self.percent_change
    }

    /// True when `|delta|` exceeds `tolerance`.
    pub fn is_changed(&self, tolerance: f64) -> bool {
        self.delta.abs() > tolerance
    }
}

fn non_negative(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Pairs
// ---------------------------------------------------------------------------

/// A `(code, new price)` pair read from a price-update sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePair {
    /// Normalized product code.
    pub code: String,
    /// Price to apply.
    pub new_price: f64,
}

/// A `(product name, price)` pair read from a promotional offer sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPair {
    /// Product name as typed in the offer sheet.
    pub product_name: String,
    /// Promotional price.
    pub price: f64,
    /// Location carried by the offer sheet, if it has a location column.
    pub location: Option<String>,
}
