/// Errors produced while reading or writing workbooks.
use thiserror::Error;

/// A workbook could not be turned into a cell matrix.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The workbook could not be opened or decoded.
    #[error("spreadsheet read error: {detail}")]
    Workbook {
        /// Human-readable description of the error.
        detail: String,
    },

    /// The requested sheet does not exist.
    #[error("missing sheet {sheet:?}; available: {}", available.join(", "))]
    MissingSheet {
        /// Name that was asked for.
        sheet: String,
        /// Sheets present in the workbook.
        available: Vec<String>,
    },

    /// The workbook has no sheets at all.
    #[error("workbook contains no sheets")]
    NoSheets,
}

/// Records could not be written as a workbook.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The xlsx writer rejected the workbook.
    #[error("Excel write error: {detail}")]
    ExcelWrite {
        /// Human-readable description of the error.
        detail: String,
    },

    /// Writing the finished workbook bytes failed.
    #[error("I/O error writing workbook: {detail}")]
    Io {
        /// Human-readable description of the error.
        detail: String,
    },
}

