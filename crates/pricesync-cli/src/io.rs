/// Workbook input with size enforcement, and output file writing.
///
/// This module is the single entry point for all file I/O in the `pricesync`
/// binary. `pricesync-core` never touches the filesystem; all reading and
/// writing happens here and in `pricesync-excel`.
///
/// Key behaviours:
/// - Disk files: size checked via `std::fs::metadata` before any read.
/// - Stdin: buffered with a `Read::take` cap so allocation is bounded.
/// - Bytes are decoded by `pricesync-excel`, which sniffs the format.
/// - All I/O and decode errors become [`CliError`] variants with exit code 2.
use std::io::Read as _;
use std::path::Path;

use pricesync_core::CellMatrix;
use pricesync_excel::{ReadError, read_matrix_from_bytes};

use crate::PathOrStdin;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads one sheet of the workbook at `source` into a cell matrix.
///
/// `sheet = None` selects the first sheet.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) when the input cannot be read, exceeds
/// `max_size`, is not a spreadsheet, or lacks the requested sheet.
pub fn load_matrix(
    source: &PathOrStdin,
    sheet: Option<&str>,
    max_size: u64,
) -> Result<CellMatrix, CliError> {
    let bytes = read_bytes(source, max_size)?;
    read_matrix_from_bytes(&bytes, sheet).map_err(|e| workbook_error(e, &source.label()))
}

/// Reads the raw bytes of `source`.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) for missing files, permission errors,
/// inputs over `max_size`, and any other I/O error.
pub fn read_bytes(source: &PathOrStdin, max_size: u64) -> Result<Vec<u8>, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

/// Writes `bytes` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`CliError::IoError`] when the file cannot be written.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, bytes).map_err(|e| CliError::IoError {
        source: path.display().to_string(),
        detail: e.to_string(),
    })
}

/// Fails when more than one input reads from stdin.
///
/// # Errors
///
/// Returns [`CliError::InvalidArgument`] on a second `-`.
pub fn check_single_stdin<'a>(
    sources: impl IntoIterator<Item = &'a PathOrStdin>,
) -> Result<(), CliError> {
    let stdin_count = sources
        .into_iter()
        .filter(|s| matches!(s, PathOrStdin::Stdin))
        .count();
    if stdin_count > 1 {
        return Err(CliError::InvalidArgument {
            detail: "at most one input may be read from stdin ('-')".to_owned(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Disk file reading
// ---------------------------------------------------------------------------

/// Reads a disk file, enforcing the size limit.
fn read_file(path: &Path, max_size: u64) -> Result<Vec<u8>, CliError> {
    let file_size = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            return Err(io_error_to_cli(&e, path));
        }
    };

    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }

    std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))
}

/// Maps a `std::io::Error` arising from a disk-file operation to a [`CliError`].
fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    match e.kind() {
        std::io::ErrorKind::NotFound => CliError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => CliError::PermissionDenied {
            path: path.to_path_buf(),
        },
        // Everything else is reported with the OS message. The common kinds
        // are listed to keep the exhaustiveness lint meaningful.
        std::io::ErrorKind::IsADirectory
        | std::io::ErrorKind::NotADirectory
        | std::io::ErrorKind::InvalidInput
        | std::io::ErrorKind::InvalidData
        | std::io::ErrorKind::TimedOut
        | std::io::ErrorKind::ResourceBusy
        | std::io::ErrorKind::Interrupted
        | std::io::ErrorKind::Unsupported
        | std::io::ErrorKind::UnexpectedEof
        | std::io::ErrorKind::OutOfMemory
        | std::io::ErrorKind::Other
        | _ => CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Stdin reading
// ---------------------------------------------------------------------------

/// Reads the entire stdin stream, capped at `max_size` bytes.
///
/// If the stream produces exactly `max_size` bytes one more byte is probed to
/// tell "exactly at the limit" from "over the limit".
fn read_stdin(max_size: u64) -> Result<Vec<u8>, CliError> {
    let stdin = std::io::stdin();
    let handle = stdin.lock();

    let mut limited = handle.take(max_size);
    let mut buf: Vec<u8> = Vec::new();

    limited
        .read_to_end(&mut buf)
        .map_err(|e| CliError::StdinReadError {
            detail: e.to_string(),
        })?;

    if buf.len() as u64 == max_size {
        let mut handle = limited.into_inner();
        let mut probe = [0u8; 1];
        let extra = handle
            .read(&mut probe)
            .map_err(|e| CliError::StdinReadError {
                detail: e.to_string(),
            })?;
        if extra > 0 {
            return Err(CliError::FileTooLarge {
                source: "-".to_owned(),
                limit: max_size,
                actual: None,
            });
        }
    }

    Ok(buf)
}

// ---------------------------------------------------------------------------
// Workbook decoding
// ---------------------------------------------------------------------------

/// Maps a [`ReadError`] to a [`CliError`] naming the input.
fn workbook_error(e: ReadError, source: &str) -> CliError {
    match e {
        ReadError::Workbook { detail } => CliError::UnreadableWorkbook {
            source: source.to_owned(),
            detail,
        },
        ReadError::MissingSheet { .. } | ReadError::NoSheets => CliError::UnreadableWorkbook {
            source: source.to_owned(),
            detail: e.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
