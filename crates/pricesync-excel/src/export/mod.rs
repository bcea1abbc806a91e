/// Workbook export of reconciled product records.
///
/// [`export_records`] writes the flat product list; [`export_grouped`] adds
/// one sheet per valid furniture location after it. Both write the finished
/// workbook bytes to any [`std::io::Write`].
mod grouped;
mod records;
mod sheet_name;

pub use grouped::export_grouped;
pub use records::{PRODUCTS_SHEET, export_records};
pub use sheet_name::{SheetNames, sanitize_sheet_name};

use std::io::Write;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::error::ExportError;

/// Adds a worksheet called `name` and returns it for writing.
fn add_named_sheet<'a>(wb: &'a mut Workbook, name: &str) -> Result<&'a mut Worksheet, ExportError> {
    wb.add_worksheet()
        .set_name(name)
        .map_err(|e: XlsxError| ExportError::ExcelWrite {
            detail: e.to_string(),
        })?;
    wb.worksheet_from_name(name)
        .map_err(|e: XlsxError| ExportError::ExcelWrite {
            detail: e.to_string(),
        })
}

/// Serializes the workbook and writes it to `writer`.
fn finish<W: Write>(wb: &mut Workbook, mut writer: W) -> Result<(), ExportError> {
    let xlsx_bytes = wb
        .save_to_buffer()
        .map_err(|e: XlsxError| ExportError::ExcelWrite {
            detail: e.to_string(),
        })?;

    writer.write_all(&xlsx_bytes).map_err(|e| ExportError::Io {
        detail: e.to_string(),
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        detail: e.to_string(),
    })?;
    Ok(())
}

fn ws_write(ws: &mut Worksheet, row: u32, col: u16, val: &str) -> Result<(), ExportError> {
    if val.is_empty() {
        return Ok(());
    }
    ws.write(row, col, val)
        .map(|_| ())
        .map_err(|e: XlsxError| ExportError::ExcelWrite {
            detail: e.to_string(),
        })
}

fn ws_write_f64(ws: &mut Worksheet, row: u32, col: u16, val: f64) -> Result<(), ExportError> {
    ws.write(row, col, val)
        .map(|_| ())
        .map_err(|e: XlsxError| ExportError::ExcelWrite {
            detail: e.to_string(),
        })
}

fn ws_write_bool(ws: &mut Worksheet, row: u32, col: u16, val: bool) -> Result<(), ExportError> {
    ws.write(row, col, val)
        .map(|_| ())
        .map_err(|e: XlsxError| ExportError::ExcelWrite {
            detail: e.to_string(),
        })
}
