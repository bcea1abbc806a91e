/// Importers turning raw cell matrices into canonical records and pairs.
///
/// All three importers share the same shape: row 0 is the header row, columns
/// are located heuristically, then every data row is converted on its own.
/// Structural problems (too few rows, a mandatory column that cannot be
/// found) fail the whole import; malformed cells are recovered per row.
use crate::cell::{Cell, CellMatrix, cell_at, row_is_empty};
use crate::code::normalize_code;
use crate::columns::{ColumnMap, ColumnRole, OfferColumns};
use crate::config::ReconcileConfig;
use crate::error::ImportError;
use crate::price::{parse_offer_price, parse_price};
use crate::record::{OfferPair, ProductRecord, UpdatePair};

/// Splits off the header row, requiring at least one data row.
fn split_header(matrix: &CellMatrix) -> Result<(&[Cell], &[Vec<Cell>]), ImportError> {
    let Some((header, rows)) = matrix.split_first().filter(|(_, rows)| !rows.is_empty()) else {
        return Err(ImportError::InsufficientData { rows: matrix.len() });
    };
    Ok((header.as_slice(), rows))
}

/// Returns the column for a mandatory role or a [`ImportError::MissingRequiredColumn`].
fn require(columns: &ColumnMap, role: ColumnRole) -> Result<usize, ImportError> {
    columns
        .get(role)
        .ok_or(ImportError::MissingRequiredColumn { role })
}

/// Reads the verbatim text of an optional column, empty when the column is unknown.
fn optional_text(row: &[Cell], col: Option<usize>) -> String {
    col.map(|c| cell_at(row, c).raw_text()).unwrap_or_default()
}

/// True when a data row carries a usable code.
fn has_code(row: &[Cell], code_col: usize) -> bool {
    !row_is_empty(row) && !cell_at(row, code_col).is_blank()
}

// ---------------------------------------------------------------------------
// Reference importer
// ---------------------------------------------------------------------------

/// Imports a reference catalogue sheet.
///
/// Code and price columns are mandatory. Rows that are empty or have a blank
/// code are skipped. Description, brand and location text is kept verbatim;
/// only the code is normalized. Duplicate codes are kept; lookups downstream decide
/// which one a merge touches.
///
/// # Errors
///
/// - [`ImportError::InsufficientData`] when the matrix has fewer than 2 rows.
/// - [`ImportError::MissingRequiredColumn`] when the code or price column
///   cannot be identified.
pub fn import_reference(
    matrix: &CellMatrix,
    config: &ReconcileConfig,
) -> Result<Vec<ProductRecord>, ImportError> {
    let (header, rows) = split_header(matrix)?;
    let columns = ColumnMap::identify(header);
    let code_col = require(&columns, ColumnRole::Code)?;
    let price_col = require(&columns, ColumnRole::Price)?;
    tracing::debug!(?columns, "reference columns identified");

    let records: Vec<ProductRecord> = rows
        .iter()
        .filter(|row| has_code(row, code_col))
        .map(|row| {
            let location = match columns.location {
                Some(col) => cell_at(row, col).raw_text(),
                None => config.unassigned_location.clone(),
            };
            ProductRecord::new(
                normalize_code(cell_at(row, code_col)),
                optional_text(row, columns.description),
                optional_text(row, columns.brand),
                location,
                parse_price(cell_at(row, price_col)),
            )
        })
        .collect();

    tracing::debug!(
        rows = rows.len(),
        imported = records.len(),
        skipped = rows.len() - records.len(),
        "reference sheet imported"
    );
    Ok(records)
}

// ---------------------------------------------------------------------------
// Update importer
// ---------------------------------------------------------------------------

/// Imports a price-update sheet into `(code, new price)` pairs.
///
/// Only the code and price columns are used; both are mandatory.
///
/// # Errors
///
/// Same as [`import_reference`].
pub fn import_updates(matrix: &CellMatrix) -> Result<Vec<UpdatePair>, ImportError> {
    let (header, rows) = split_header(matrix)?;
    let columns = ColumnMap::identify(header);
    let code_col = require(&columns, ColumnRole::Code)?;
    let price_col = require(&columns, ColumnRole::Price)?;
    tracing::debug!(code_col, price_col, "update columns identified");

    let pairs: Vec<UpdatePair> = rows
        .iter()
        .filter(|row| has_code(row, code_col))
        .map(|row| UpdatePair {
            code: normalize_code(cell_at(row, code_col)),
            new_price: parse_price(cell_at(row, price_col)),
        })
        .collect();

    tracing::debug!(rows = rows.len(), pairs = pairs.len(), "update sheet imported");
    Ok(pairs)
}

// ---------------------------------------------------------------------------
// Offer importer
// ---------------------------------------------------------------------------

/// Imports a code-less promotional sheet into `(product name, price)` pairs.
///
/// Columns are found by keyword only and default to name = 0, price = 1.
/// Rows with a blank name are skipped. Rows whose price parses to zero are
/// dropped unless [`ReconcileConfig::keep_zero_price_offers`] is set.
///
/// # Errors
///
/// [`ImportError::InsufficientData`] when the matrix has fewer than 2 rows.
pub fn import_offers(
    matrix: &CellMatrix,
    config: &ReconcileConfig,
) -> Result<Vec<OfferPair>, ImportError> {
    let (header, rows) = split_header(matrix)?;
    let columns = OfferColumns::identify(header);
    tracing::debug!(?columns, "offer columns identified");

    let mut pairs = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let product_name = cell_at(row, columns.name).as_text();
        if product_name.is_empty() {
            continue;
        }
        let price = parse_offer_price(cell_at(row, columns.price));
        if price == 0.0 && !config.keep_zero_price_offers {
            // Row numbers are 1-based and include the header row.
            tracing::warn!(
                row = idx + 2,
                product = %product_name,
                "offer dropped: price is zero or unparsable"
            );
            continue;
        }
        let location = columns
            .location
            .map(|c| cell_at(row, c).as_text())
            .filter(|loc| !loc.is_empty());
        pairs.push(OfferPair {
            product_name,
            price,
            location,
        });
    }

    tracing::debug!(rows = rows.len(), offers = pairs.len(), "offer sheet imported");
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use super::*;
    use crate::cell::matrix;
    use crate::record::PercentChange;

    fn config() -> ReconcileConfig {
        ReconcileConfig::default()
    }

    #[test]
    fn reference_scenario_builds_one_canonical_record() {
        let m = matrix([
            ["Mueble", "COD", "DROGA", "MARCA", "PVP"],
            ["A1", "057", "Amoxicilina", "Bayer", "1500"],
        ]);
        let records = import_reference(&m, &config()).expect("import");
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.code, "57");
        assert_eq!(r.description, "Amoxicilina");
        assert_eq!(r.brand, "Bayer");
        assert_eq!(r.location, "A1");
        assert_eq!(r.previous_price(), 1500.0);
        assert_eq!(r.updated_price(), 1500.0);
        assert_eq!(r.delta(), 0.0);
        assert_eq!(r.percent_change(), PercentChange::NotApplicable);
        assert!(!r.is_offer);
    }

    #[test]
    fn reference_requires_two_rows() {
        let m = matrix([["COD", "PVP"]]);
        assert_eq!(
            import_reference(&m, &config()),
            Err(ImportError::InsufficientData { rows: 1 })
        );
        assert_eq!(
            import_reference(&Vec::new(), &config()),
            Err(ImportError::InsufficientData { rows: 0 })
        );
    }

    #[test]
    fn reference_reports_missing_price_column() {
        // Two columns: code falls back to index 1, price has no fallback.
        let m = matrix([["Mueble", "COD"], ["A1", "57"]]);
        assert_eq!(
            import_reference(&m, &config()),
            Err(ImportError::MissingRequiredColumn {
                role: ColumnRole::Price
            })
        );
    }

    #[test]
    fn reference_reports_missing_code_column() {
        let m = matrix([["PVP"], ["10"]]);
        assert_eq!(
            import_reference(&m, &config()),
            Err(ImportError::MissingRequiredColumn {
                role: ColumnRole::Code
            })
        );
    }

    #[test]
    fn reference_skips_empty_rows_and_blank_codes() {
        let m = matrix([
            ["COD", "PVP", "DROGA"],
            ["", "10", "sin codigo"],
            ["", "", ""],
            ["12", "abc", "Ibuprofeno"],
        ]);
        let records = import_reference(&m, &config()).expect("import");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "12");
        assert_eq!(records[0].previous_price(), 0.0, "unparsable price defaults to 0");
    }

    #[test]
    fn reference_defaults_missing_optional_columns() {
        let m = matrix([["Código", "Precio"], ["0012", "99.5"]]);
        let records = import_reference(&m, &config()).expect("import");
        let r = &records[0];
        assert_eq!(r.description, "");
        assert_eq!(r.brand, "");
        assert_eq!(r.previous_price(), 99.5);
        // Location always has a positional fallback to column 0.
        assert_eq!(r.location, "0012");
    }

    #[test]
    fn empty_header_row_cannot_locate_code() {
        let m = vec![vec![], vec![Cell::from("x"), Cell::from("57")]];
        // An empty header row identifies nothing, so the code column is missing.
        assert_eq!(
            import_reference(&m, &config()),
            Err(ImportError::MissingRequiredColumn {
                role: ColumnRole::Code
            })
        );
    }

    #[test]
    fn reference_keeps_duplicate_codes() {
        let m = matrix([
            ["COD", "PVP"],
            ["57", "10"],
            ["0057", "12"],
        ]);
        let records = import_reference(&m, &config()).expect("import");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.code == "57"));
    }

    #[test]
    fn reference_accepts_numeric_cells() {
        let m = vec![
            vec![Cell::from("COD"), Cell::from("PVP")],
            vec![Cell::Number(57.0), Cell::Number(1500.0)],
        ];
        let records = import_reference(&m, &config()).expect("import");
        assert_eq!(records[0].code, "57");
        assert_eq!(records[0].previous_price(), 1500.0);
    }

    #[test]
    fn reference_text_columns_are_verbatim() {
        let m = matrix([
            ["Mueble", "COD", "DROGA", "MARCA", "PVP"],
            [" A1 ", " 057 ", "  Amoxicilina 500 ", "Bayer ", "1500"],
        ]);
        let records = import_reference(&m, &config()).expect("import");
        let r = &records[0];
        assert_eq!(r.code, "57");
        assert_eq!(r.description, "  Amoxicilina 500 ");
        assert_eq!(r.brand, "Bayer ");
        assert_eq!(r.location, " A1 ");
    }

    #[test]
    fn offers_with_oferta_in_the_name_header_keep_their_price() {
        let m = matrix([
            ["Producto en oferta", "Precio"],
            ["Ibuprofeno Jarabe", "950"],
        ]);
        let pairs = import_offers(&m, &config()).expect("import");
        assert_eq!(
            pairs,
            vec![OfferPair {
                product_name: "Ibuprofeno Jarabe".to_owned(),
                price: 950.0,
                location: None,
            }]
        );

        let m = matrix([["Oferta", "Medicamento"], ["$1.500", "Gasas"]]);
        let pairs = import_offers(&m, &config()).expect("import");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].product_name, "Gasas");
        assert_eq!(pairs[0].price, 1500.0);
    }

    #[test]
    fn updates_produce_normalized_pairs() {
        let m = matrix([
            ["Codigo", "Precio nuevo"],
            ["0057", "1800"],
            ["", "5"],
            ["99", "n/d"],
        ]);
        let pairs = import_updates(&m).expect("import");
        assert_eq!(
            pairs,
            vec![
                UpdatePair {
                    code: "57".to_owned(),
                    new_price: 1800.0
                },
                UpdatePair {
                    code: "99".to_owned(),
                    new_price: 0.0
                },
            ]
        );
    }

    #[test]
    fn updates_require_code_and_price() {
        let m = matrix([["x"], ["1"]]);
        match import_updates(&m) {
            Err(ImportError::MissingRequiredColumn { role }) => {
                assert_eq!(role, ColumnRole::Code);
            }
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn offers_are_read_by_keyword() {
        let m = matrix([
            ["Precio", "Producto"],
            ["$ 950", "Ibuprofeno Jarabe"],
            ["1.250,50", "Paracetamol"],
        ]);
        let offers = import_offers(&m, &config()).expect("import");
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].product_name, "Ibuprofeno Jarabe");
        assert_eq!(offers[0].price, 950.0);
        assert_eq!(offers[1].price, 1250.5);
        assert_eq!(offers[0].location, None);
    }

    #[test]
    fn offers_default_to_first_two_columns() {
        let m = matrix([["a", "b"], ["Aspirina", "300"]]);
        let offers = import_offers(&m, &config()).expect("import");
        assert_eq!(offers[0].product_name, "Aspirina");
        assert_eq!(offers[0].price, 300.0);
    }

    #[test]
    fn offers_drop_blank_names_and_zero_prices() {
        let m = matrix([
            ["Producto", "Precio"],
            ["", "100"],
            ["Gasas", "consultar"],
            ["Alcohol", "0"],
            ["Algodon", "450"],
        ]);
        let offers = import_offers(&m, &config()).expect("import");
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].product_name, "Algodon");
    }

    #[test]
    fn zero_price_offers_can_be_kept() {
        let m = matrix([["Producto", "Precio"], ["Muestra gratis", "0"]]);
        let cfg = ReconcileConfig {
            keep_zero_price_offers: true,
            ..ReconcileConfig::default()
        };
        let offers = import_offers(&m, &cfg).expect("import");
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].price, 0.0);
    }

    #[test]
    fn offers_carry_location_when_present() {
        let m = matrix([
            ["Producto", "Precio", "Mueble"],
            ["Crema", "800", "Vidriera 2"],
            ["Jabon", "200", ""],
        ]);
        let offers = import_offers(&m, &config()).expect("import");
        assert_eq!(offers[0].location.as_deref(), Some("Vidriera 2"));
        assert_eq!(offers[1].location, None);
    }

    #[test]
    fn offers_require_two_rows() {
        let m = matrix([["Producto", "Precio"]]);
        assert_eq!(
            import_offers(&m, &config()),
            Err(ImportError::InsufficientData { rows: 1 })
        );
    }
}
