//! Implementation of `pricesync columns <file>`.
//!
//! Reads the header row of one sheet and reports which column each role
//! resolved to under the chosen importer's rules. Useful when a field
//! spreadsheet imports with prices or codes in the wrong place.
//!
//! Exit codes: 0 = success, 2 = unreadable input.
use std::io::Write;

use serde::Serialize;

use pricesync_core::{
    Cell, ColumnMap, ColumnRole, OfferColumns, identify_code_column, identify_price_column,
};

use super::pipeline::ReadOptions;
use crate::error::CliError;
use crate::format::{to_stdout, write_json};
use crate::io::load_matrix;
use crate::{OutputFormat, PathOrStdin, SheetRole};

/// One resolved role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnLine {
    /// Role name.
    pub role: &'static str,
    /// Zero-based column index, or `None` when not identified.
    pub index: Option<usize>,
    /// The header text of that column, if any.
    pub header: Option<String>,
}

/// Resolution of every role of one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    /// Number of rows in the sheet, header included.
    pub rows: usize,
    /// Roles in display order.
    pub columns: Vec<ColumnLine>,
}

impl ColumnReport {
    /// Resolves the columns of `matrix` under `role`'s rules.
    pub fn build(matrix: &[Vec<Cell>], role: SheetRole) -> Self {
        let header: &[Cell] = matrix.first().map(Vec::as_slice).unwrap_or_default();
        let resolved: Vec<(&'static str, Option<usize>)> = match role {
            SheetRole::Reference => {
                let map = ColumnMap::identify(header);
                ColumnRole::ALL
                    .iter()
                    .map(|r| (r.as_str(), map.get(*r)))
                    .collect()
            }
            SheetRole::Update => vec![
                (ColumnRole::Code.as_str(), identify_code_column(header)),
                (ColumnRole::Price.as_str(), identify_price_column(header)),
            ],
            SheetRole::Offers => {
                let cols = OfferColumns::identify(header);
                vec![
                    ("name", Some(cols.name)),
                    ("price", Some(cols.price)),
                    ("location", cols.location),
                ]
            }
        };

        let columns = resolved
            .into_iter()
            .map(|(role, index)| ColumnLine {
                role,
                index,
                header: index
                    .and_then(|i| header.get(i))
                    .map(Cell::as_text)
                    .filter(|t| !t.is_empty()),
            })
            .collect();

        Self {
            rows: matrix.len(),
            columns,
        }
    }
}

/// Runs the `columns` command.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) when the workbook cannot be read.
pub fn run(
    file: &PathOrStdin,
    role: SheetRole,
    read: ReadOptions<'_>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let matrix = load_matrix(file, read.sheet, read.max_file_size)?;
    let report = ColumnReport::build(&matrix, role);

    match format {
        OutputFormat::Human => to_stdout(|w| print_human(w, &report)),
        OutputFormat::Json => to_stdout(|w| write_json(w, &report)),
    }
}

fn print_human<W: Write>(w: &mut W, report: &ColumnReport) -> std::io::Result<()> {
    writeln!(w, "rows:         {}", report.rows)?;
    for line in &report.columns {
        let label = format!("{}:", line.role);
        match (line.index, &line.header) {
            (Some(i), Some(h)) => writeln!(w, "{label:<14}{i}  {h:?}")?,
            (Some(i), None) => writeln!(w, "{label:<14}{i}")?,
            (None, _) => writeln!(w, "{label:<14}not found")?,
        }
    }
    Ok(())
}
