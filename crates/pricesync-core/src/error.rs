/// Errors surfaced by the reconciliation engine.
///
/// Only structural problems are errors. Malformed cells (a non-numeric price,
/// a blank code) are recovered locally with safe defaults so a single bad cell
/// never aborts an import.
use thiserror::Error;

use crate::columns::ColumnRole;

/// A sheet could not be imported at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The matrix has no data rows below the header.
    #[error("insufficient data: expected a header row and at least one data row, got {rows} row(s)")]
    InsufficientData {
        /// Number of rows received.
        rows: usize,
    },

    /// A mandatory column could not be identified, not even by position.
    #[error("missing required column: {role}")]
    MissingRequiredColumn {
        /// The role that could not be located.
        role: ColumnRole,
    },
}

/// A manual location assignment could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    /// No record carries the requested code.
    #[error("no product with code {code:?}")]
    UnknownCode {
        /// The normalized code that was looked up.
        code: String,
    },
}
