/// Spreadsheet I/O for the pricesync reconciliation engine.
///
/// Reading turns one sheet of an `.xlsx`, `.xls` or `.ods` workbook into the
/// core's [`pricesync_core::CellMatrix`]; export writes reconciled
/// [`pricesync_core::ProductRecord`]s back out as `.xlsx`. The `calamine` and
/// `rust_xlsxwriter` dependencies are confined to this crate and do not bleed
/// into `pricesync-core`.
///
/// # Export layout
///
/// | Sheet | Content |
/// |---|---|
/// | Productos | Every record, header row in export field order |
/// | one per location | Records of one valid furniture location (grouped export only) |
pub mod error;
pub mod export;
mod sheet;

pub use error::{ExportError, ReadError};
pub use export::{PRODUCTS_SHEET, export_grouped, export_records, sanitize_sheet_name};
pub use sheet::{
    cell_from_data, range_to_matrix, read_matrix, read_matrix_from_bytes, read_matrix_from_reader,
};

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::io::Cursor;

    use calamine::{Reader, open_workbook_auto_from_rs};
    use pricesync_core::{Cell, ProductRecord, ReconcileConfig, UpdatePair, merge_prices};

    use super::*;

    fn records() -> Vec<ProductRecord> {
        let base = vec![
            ProductRecord::new("57", "Amoxicilina", "Bayer", "A1", 1500.0),
            ProductRecord::new("12", "Paracetamol", "Roemmers", "NO", 800.0),
            ProductRecord::new("9", "Gasas", "", "B/2", 300.0),
            ProductRecord::new("31", "Crema", "Lab", "A1", 0.0),
        ];
        let updates = vec![UpdatePair {
            code: "57".to_owned(),
            new_price: 1800.0,
        }];
        merge_prices(&base, &updates, &ReconcileConfig::default()).records
    }

    fn sheet_names(bytes: &[u8]) -> Vec<String> {
        open_workbook_auto_from_rs(Cursor::new(bytes))
            .expect("open exported workbook")
            .sheet_names()
    }

    #[test]
    fn exported_records_read_back() {
        let mut buf = Vec::new();
        export_records(&records(), &mut buf).expect("export");
        assert_eq!(sheet_names(&buf), ["Productos"]);

        let matrix = read_matrix_from_bytes(&buf, None).expect("read back");
        assert_eq!(matrix.len(), 5);
        let header: Vec<String> = matrix[0].iter().map(Cell::as_text).collect();
        assert_eq!(header, ProductRecord::EXPORT_FIELDS);

        let amox = &matrix[1];
        assert_eq!(amox[0].as_text(), "57");
        assert_eq!(amox[2], Cell::Number(1500.0));
        assert_eq!(amox[5], Cell::Number(300.0));
        assert_eq!(amox[6].as_text(), "20.00%");
        assert_eq!(amox[7], Cell::Bool(false));
        assert_eq!(amox[8], Cell::Number(1800.0));

        let crema = &matrix[4];
        assert_eq!(crema[6].as_text(), "N/A");
    }

    #[test]
    fn grouped_export_adds_location_sheets() {
        let mut buf = Vec::new();
        export_grouped(&records(), &mut buf).expect("export");
        assert_eq!(sheet_names(&buf), ["Productos", "A1", "B_2"]);

        let a1 = read_matrix_from_bytes(&buf, Some("A1")).expect("A1 sheet");
        let codes: Vec<String> = a1[1..].iter().map(|row| row[0].as_text()).collect();
        assert_eq!(codes, ["57", "31"]);

        let full = read_matrix_from_bytes(&buf, Some("Productos")).expect("full sheet");
        assert_eq!(full.len(), 5, "invalid locations stay on the full sheet");
    }

    #[test]
    fn empty_export_has_header_only() {
        let mut buf = Vec::new();
        export_grouped(&[], &mut buf).expect("export");
        assert_eq!(sheet_names(&buf), ["Productos"]);
        let matrix = read_matrix_from_bytes(&buf, None).expect("read back");
        assert_eq!(matrix.len(), 1);
    }

    #[test]
    fn missing_sheet_lists_available_ones() {
        let mut buf = Vec::new();
        export_records(&records(), &mut buf).expect("export");
        let err = read_matrix_from_bytes(&buf, Some("Ofertas")).expect_err("no such sheet");
        match err {
            ReadError::MissingSheet { sheet, available } => {
                assert_eq!(sheet, "Ofertas");
                assert_eq!(available, ["Productos"]);
            }
            other @ (ReadError::Workbook { .. } | ReadError::NoSheets) => {
                unreachable!("unexpected error: {other}")
            }
        }
    }

    #[test]
    fn garbage_bytes_are_a_workbook_error() {
        let err = read_matrix_from_bytes(b"not a spreadsheet", None).expect_err("garbage");
        assert!(matches!(err, ReadError::Workbook { .. }));
    }
}
