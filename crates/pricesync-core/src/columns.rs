//! Heuristic column identification for loosely structured spreadsheets.
//!
//! Field spreadsheets arrive with unknown column order, inconsistent header
//! spelling, or no header row at all. Each [`ColumnRole`] is located by an
//! ordered list of [`ColumnMatcher`] strategies; the first strategy that
//! yields an index wins:
//!
//! 1. [`ColumnMatcher::Exact`]: case-sensitive canonical header literal.
//! 2. [`ColumnMatcher::Keyword`]: substring of the normalized header.
//! 3. [`ColumnMatcher::Position`]: fixed index of the legacy headerless layout
//!    (`location, code, description, brand, price`), used only when the row is
//!    wide enough.
use serde::Serialize;

use crate::cell::Cell;
use crate::header::normalize_header;

/// The semantic role a spreadsheet column can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    /// Product code.
    Code,
    /// Drug or item name.
    Description,
    /// Shelf price.
    Price,
    /// Brand or laboratory.
    Brand,
    /// Furniture / storage location tag.
    Location,
}

impl ColumnRole {
    /// All roles, in legacy layout order of their positional fallback.
    pub const ALL: [ColumnRole; 5] = [
        Self::Location,
        Self::Code,
        Self::Description,
        Self::Brand,
        Self::Price,
    ];

    /// Lowercase role name used in messages and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Description => "description",
            Self::Price => "price",
            Self::Brand => "brand",
            Self::Location => "location",
        }
    }

    /// Canonical header literals matched case-sensitively.
    fn exact_headers(self) -> &'static [&'static str] {
        match self {
            Self::Code => &["COD", "CODIGO", "CÓDIGO"],
            Self::Description => &["DROGA", "DESCRIPCION", "DESCRIPCIÓN"],
            Self::Price => &["PVP", "PRECIO"],
            Self::Brand => &["MARCA", "LABORATORIO"],
            Self::Location => &["Mueble", "MUEBLE"],
        }
    }

    /// Keywords searched for inside the normalized header.
    fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Code => &[
                "codigo", "code", "cod", "id", "articulo", "producto", "item",
            ],
            Self::Description => &[
                "droga",
                "descripcion",
                "nombre",
                "detalle",
                "medicamento",
                "producto",
            ],
            Self::Price => &["pvp", "precio", "price", "importe", "valor", "monto"],
            Self::Brand => &["marca", "laboratorio", "brand", "fabricante"],
            Self::Location => &["mueble", "ubicacion", "location", "estante", "gondola"],
        }
    }

    /// `(minimum row width, index)` of this role in the legacy headerless layout.
    fn legacy_position(self) -> (usize, usize) {
        match self {
            Self::Location => (1, 0),
            Self::Code => (2, 1),
            Self::Description => (3, 2),
            Self::Brand => (4, 3),
            Self::Price => (5, 4),
        }
    }

    /// The full, ordered matcher list for this role.
    pub fn matchers(self) -> [ColumnMatcher; 3] {
        let (min_columns, index) = self.legacy_position();
        [
            ColumnMatcher::Exact(self.exact_headers()),
            ColumnMatcher::Keyword(self.keywords()),
            ColumnMatcher::Position { min_columns, index },
        ]
    }
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column-finding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMatcher {
    /// First header cell whose trimmed text equals one of the literals.
    Exact(&'static [&'static str]),
    /// First header cell whose normalized text contains one of the keywords.
    Keyword(&'static [&'static str]),
    /// A fixed index, valid only when the header row has `min_columns` cells.
    Position {
        /// Minimum header row width for the position to apply.
        min_columns: usize,
        /// Zero-based column index.
        index: usize,
    },
}

impl ColumnMatcher {
    /// Applies this strategy to a header row.
    pub fn find(&self, header: &[Cell]) -> Option<usize> {
        self.find_excluding(header, &[])
    }

    /// Like [`ColumnMatcher::find`], but never returns an index in `taken`.
    pub fn find_excluding(&self, header: &[Cell], taken: &[usize]) -> Option<usize> {
        let mut candidates = header
            .iter()
            .enumerate()
            .filter(|(i, _)| !taken.contains(i));
        match self {
            Self::Exact(literals) => candidates
                .find(|(_, cell)| {
                    let text = cell.as_text();
                    literals.iter().any(|lit| text == *lit)
                })
                .map(|(i, _)| i),
            Self::Keyword(keywords) => candidates
                .find(|(_, cell)| {
                    let token = normalize_header(cell);
                    !token.is_empty() && keywords.iter().any(|kw| token.contains(kw))
                })
                .map(|(i, _)| i),
            Self::Position { min_columns, index } => {
                (header.len() >= *min_columns && !taken.contains(index)).then_some(*index)
            }
        }
    }
}

/// Runs `matchers` in order and returns the first hit.
pub fn identify_with(header: &[Cell], matchers: &[ColumnMatcher]) -> Option<usize> {
    matchers.iter().find_map(|m| m.find(header))
}

/// Locates the column playing `role` in `header`, or `None` when not found.
pub fn identify_column(header: &[Cell], role: ColumnRole) -> Option<usize> {
    let found = identify_with(header, &role.matchers());
    tracing::trace!(role = role.as_str(), column = ?found, "column identified");
    found
}

/// Locates the code column.
pub fn identify_code_column(header: &[Cell]) -> Option<usize> {
    identify_column(header, ColumnRole::Code)
}

/// Locates the description column.
pub fn identify_description_column(header: &[Cell]) -> Option<usize> {
    identify_column(header, ColumnRole::Description)
}

/// Locates the price column.
pub fn identify_price_column(header: &[Cell]) -> Option<usize> {
    identify_column(header, ColumnRole::Price)
}

/// Locates the brand column.
pub fn identify_brand_column(header: &[Cell]) -> Option<usize> {
    identify_column(header, ColumnRole::Brand)
}

/// Locates the furniture/location column.
pub fn identify_location_column(header: &[Cell]) -> Option<usize> {
    identify_column(header, ColumnRole::Location)
}

/// Column indices for every role of a reference-style sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ColumnMap {
    /// Code column.
    pub code: Option<usize>,
    /// Description column.
    pub description: Option<usize>,
    /// Price column.
    pub price: Option<usize>,
    /// Brand column.
    pub brand: Option<usize>,
    /// Location column.
    pub location: Option<usize>,
}

impl ColumnMap {
    /// Identifies all five roles in `header`.
    pub fn identify(header: &[Cell]) -> Self {
        Self {
            code: identify_code_column(header),
            description: identify_description_column(header),
            price: identify_price_column(header),
            brand: identify_brand_column(header),
            location: identify_location_column(header),
        }
    }

    /// The column found for `role`.
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Code => self.code,
            ColumnRole::Description => self.description,
            ColumnRole::Price => self.price,
            ColumnRole::Brand => self.brand,
            ColumnRole::Location => self.location,
        }
    }
}

// ---------------------------------------------------------------------------
// Offer sheets
// ---------------------------------------------------------------------------

/// Keywords locating the product-name column of an offer sheet.
pub const OFFER_NAME_KEYWORDS: &[&str] = &[
    "producto",
    "descripcion",
    "nombre",
    "articulo",
    "droga",
    "detalle",
    "medicamento",
];

/// Keywords locating the price column of an offer sheet.
pub const OFFER_PRICE_KEYWORDS: &[&str] = &["precio", "pvp", "importe", "valor", "monto"];

/// Weaker price hints, tried only when no [`OFFER_PRICE_KEYWORDS`] column
/// exists and never on the name column (`"Producto en oferta"`).
pub const OFFER_MARKER_KEYWORDS: &[&str] = &["oferta", "promo"];

/// Keywords locating an optional location column of an offer sheet.
pub const OFFER_LOCATION_KEYWORDS: &[&str] = &["mueble", "ubicacion", "estante", "gondola"];

/// Column indices of an offer sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OfferColumns {
    /// Product-name column (defaults to 0).
    pub name: usize,
    /// Price column (defaults to 1).
    pub price: usize,
    /// Location column, when the sheet carries one.
    pub location: Option<usize>,
}

impl OfferColumns {
    /// Identifies offer columns by keyword only, with positional defaults.
    ///
    /// The name and price columns are always distinct. An explicit price
    /// header is claimed first, then the name column among the rest, and only
    /// then the weaker offer markers.
    pub fn identify(header: &[Cell]) -> Self {
        let priced = ColumnMatcher::Keyword(OFFER_PRICE_KEYWORDS).find(header);
        let named = ColumnMatcher::Keyword(OFFER_NAME_KEYWORDS)
            .find_excluding(header, priced.as_slice());
        let priced = priced.or_else(|| {
            ColumnMatcher::Keyword(OFFER_MARKER_KEYWORDS).find_excluding(header, named.as_slice())
        });
        let name = named.unwrap_or_else(|| first_other(priced, 0));
        let price = priced.unwrap_or_else(|| first_other(Some(name), 1));
        let location =
            ColumnMatcher::Keyword(OFFER_LOCATION_KEYWORDS).find_excluding(header, &[name, price]);
        Self {
            name,
            price,
            location,
        }
    }
}

/// `preferred`, or the other of the first two columns when `preferred` is taken.
fn first_other(taken: Option<usize>, preferred: usize) -> usize {
    match taken {
        Some(t) if t == preferred => usize::from(preferred == 0),
        Some(_) | None => preferred,
    }
}
