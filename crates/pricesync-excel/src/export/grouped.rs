/// The full product sheet followed by one sheet per furniture location.
use std::io::Write;

use rust_xlsxwriter::Workbook;

use pricesync_core::{ProductRecord, group_by_location};

use super::records::{PRODUCTS_SHEET, write_records_sheet};
use super::sheet_name::SheetNames;
use super::{add_named_sheet, finish};
use crate::error::ExportError;

/// Exports all records, then each valid location group on its own sheet.
///
/// Group sheets follow the first appearance of their location tag. Records
/// with an invalid location only appear on the full sheet.
///
/// # Errors
///
/// Returns [`ExportError`] if the workbook cannot be built or written.
pub fn export_grouped<W: Write>(records: &[ProductRecord], writer: W) -> Result<(), ExportError> {
    let mut wb = Workbook::new();
    let mut names = SheetNames::new();

    let full = names.claim(PRODUCTS_SHEET);
    let ws = add_named_sheet(&mut wb, &full)?;
    write_records_sheet(ws, records)?;

    for group in group_by_location(records) {
        let name = names.claim(&group.location);
        tracing::debug!(
            location = %group.location,
            sheet = %name,
            records = group.records.len(),
            "writing location sheet"
        );
        let ws = add_named_sheet(&mut wb, &name)?;
        write_records_sheet(ws, &group.records)?;
    }

    finish(&mut wb, writer)
}
