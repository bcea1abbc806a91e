/// The flat `Productos` sheet.
use std::io::Write;

use rust_xlsxwriter::{Workbook, Worksheet};

use pricesync_core::ProductRecord;

use super::{add_named_sheet, finish, ws_write, ws_write_bool, ws_write_f64};
use crate::error::ExportError;

/// Name of the sheet holding every record.
pub const PRODUCTS_SHEET: &str = "Productos";

/// Exports `records` as a single-sheet workbook.
///
/// Row 1 holds the field names in [`ProductRecord::EXPORT_FIELDS`] order; each
/// following row is one record, in dataset order.
///
/// # Errors
///
/// Returns [`ExportError`] if the workbook cannot be built or written.
pub fn export_records<W: Write>(records: &[ProductRecord], writer: W) -> Result<(), ExportError> {
    let mut wb = Workbook::new();
    let ws = add_named_sheet(&mut wb, PRODUCTS_SHEET)?;
    write_records_sheet(ws, records)?;
    finish(&mut wb, writer)
}

/// Writes the header row and one row per record.
pub(super) fn write_records_sheet(
    ws: &mut Worksheet,
    records: &[ProductRecord],
) -> Result<(), ExportError> {
    for (col, header) in ProductRecord::EXPORT_FIELDS.iter().enumerate() {
        ws_write(ws, 0, col as u16, header)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (1 + i) as u32;
        ws_write(ws, row, 0, &record.code)?;
        ws_write(ws, row, 1, &record.description)?;
        ws_write_f64(ws, row, 2, record.previous_price())?;
        ws_write(ws, row, 3, &record.location)?;
        ws_write(ws, row, 4, &record.brand)?;
        ws_write_f64(ws, row, 5, record.delta())?;
        ws_write(ws, row, 6, &record.percent_change().to_string())?;
        ws_write_bool(ws, row, 7, record.is_offer)?;
        ws_write_f64(ws, row, 8, record.updated_price())?;
    }
    Ok(())
}
