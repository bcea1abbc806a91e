/// Conversion of calamine worksheets into the engine's cell matrix.
///
/// calamine trims a range to its used area, so a sheet whose first column
/// is blank comes back shifted left. [`range_to_matrix`] pads rows back to
/// column A so positional column identification sees the same indices the
/// user sees in the spreadsheet. Leading blank rows are not restored: the
/// first non-empty row is the header.
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto, open_workbook_auto_from_rs};

use pricesync_core::{Cell, CellMatrix};

use crate::error::ReadError;

/// Converts a `calamine::Data` cell to a [`Cell`].
///
/// Integers and floats become numbers, dates and durations keep their
/// textual form, error cells read as empty.
pub fn cell_from_data(cell: &Data) -> Cell {
    match cell {
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Text(dt.to_string()),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
        Data::Empty => Cell::Empty,
    }
}

/// Builds a row-major [`CellMatrix`] anchored at column A.
pub fn range_to_matrix(range: &Range<Data>) -> CellMatrix {
    let lead = range.start().map_or(0, |(_, col)| col as usize);
    range
        .rows()
        .map(|row| {
            let mut cells = vec![Cell::Empty; lead];
            cells.extend(row.iter().map(cell_from_data));
            cells
        })
        .collect()
}

/// Reads one sheet of the workbook at `path` (`.xlsx`, `.xls`, `.ods`).
///
/// When `sheet` is `None` the first sheet is read.
///
/// # Errors
///
/// Returns [`ReadError`] when the file cannot be opened, has no sheets, or
/// lacks the requested sheet.
pub fn read_matrix(path: &Path, sheet: Option<&str>) -> Result<CellMatrix, ReadError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| ReadError::Workbook {
        detail: format!("{}: {e}", path.display()),
    })?;
    read_sheet(&mut workbook, sheet)
}

/// Reads one sheet of an uploaded workbook held in memory.
///
/// # Errors
///
/// Same as [`read_matrix`].
pub fn read_matrix_from_bytes(bytes: &[u8], sheet: Option<&str>) -> Result<CellMatrix, ReadError> {
    read_matrix_from_reader(Cursor::new(bytes), sheet)
}

/// Reads one sheet from any seekable reader. The format is sniffed from the
/// content.
///
/// # Errors
///
/// Same as [`read_matrix`].
pub fn read_matrix_from_reader<R: Read + Seek + Clone>(
    reader: R,
    sheet: Option<&str>,
) -> Result<CellMatrix, ReadError> {
    let mut workbook = open_workbook_auto_from_rs(reader).map_err(|e| ReadError::Workbook {
        detail: e.to_string(),
    })?;
    read_sheet(&mut workbook, sheet)
}

fn read_sheet<R: Read + Seek>(
    workbook: &mut Sheets<R>,
    sheet: Option<&str>,
) -> Result<CellMatrix, ReadError> {
    let sheet_names: Vec<String> = workbook.sheet_names();
    let name = match sheet {
        Some(wanted) => {
            if !sheet_names.iter().any(|s| s == wanted) {
                return Err(ReadError::MissingSheet {
                    sheet: wanted.to_owned(),
                    available: sheet_names,
                });
            }
            wanted.to_owned()
        }
        None => sheet_names.first().cloned().ok_or(ReadError::NoSheets)?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| ReadError::Workbook {
            detail: format!("failed to read sheet {name:?}: {e}"),
        })?;
    let matrix = range_to_matrix(&range);
    tracing::debug!(sheet = %name, rows = matrix.len(), "sheet read");
    Ok(matrix)
}
