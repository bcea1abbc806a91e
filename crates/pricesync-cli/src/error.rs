/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `pricesync` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure. A file could not be found or read, a
///   workbook could not be decoded, or an argument was unusable. Nothing has
///   been reconciled.
/// - Exit code **1**: logical failure. The inputs were readable but the
///   engine rejected them (too few rows, no identifiable code or price
///   column, assignment to an unknown code).
use std::fmt;
use std::path::PathBuf;

use pricesync_core::{AssignError, ImportError};

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `pricesync` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes; `None` for stdin.
        actual: Option<u64>,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error, reading an input or writing an output.
    IoError {
        /// The file involved, `"stdout"`, or `"-"` for stdin.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The bytes could not be decoded as a spreadsheet, or the requested
    /// sheet is missing.
    UnreadableWorkbook {
        /// The input involved.
        source: String,
        /// The reader's error message.
        detail: String,
    },

    /// An argument combination that cannot be acted on.
    InvalidArgument {
        /// What was wrong.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// An importer rejected a sheet.
    ImportRejected {
        /// The input involved.
        source: String,
        /// Why the sheet was rejected.
        error: ImportError,
    },

    /// A manual assignment named a code that no record carries.
    AssignmentFailed {
        /// The underlying error.
        error: AssignError,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    ///
    /// - `2`: input failure.
    /// - `1`: logical failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::UnreadableWorkbook { .. }
            | Self::InvalidArgument { .. } => 2,

            Self::ImportRejected { .. } | Self::AssignmentFailed { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::UnreadableWorkbook { source, detail } => {
                format!("error: cannot read workbook {source}: {detail}")
            }
            Self::InvalidArgument { detail } => format!("error: {detail}"),
            Self::ImportRejected { source, error } => {
                format!("error: {source} rejected: {error}")
            }
            Self::AssignmentFailed { error } => format!("error: {error}"),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

impl From<AssignError> for CliError {
    fn from(error: AssignError) -> Self {
        Self::AssignmentFailed { error }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
