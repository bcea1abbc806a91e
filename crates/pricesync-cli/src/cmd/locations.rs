//! Implementation of `pricesync locations <reference>`.
//!
//! Runs the same import sequence as `reconcile` (without assignments) and
//! lists every location tag in first-appearance order with its record count
//! and whether it will be exported as its own group.
//!
//! Exit codes: 0 = success, 1 = sheet rejected, 2 = unreadable input.
use std::io::Write;

use pricesync_core::{LocationStatus, ReconcileConfig};

use super::pipeline::{self, ReadOptions, Sources};
use crate::OutputFormat;
use crate::error::CliError;
use crate::format::{tag, to_stdout, write_json};

/// Runs the `locations` command.
///
/// # Errors
///
/// Returns [`CliError`] on unreadable or rejected inputs.
pub fn run(
    sources: &Sources<'_>,
    read: ReadOptions<'_>,
    config: &ReconcileConfig,
    format: OutputFormat,
) -> Result<(), CliError> {
    let out = pipeline::run(sources, read, config)?;
    let report = out.dataset.location_report();

    match format {
        OutputFormat::Human => to_stdout(|w| print_human(w, &report)),
        OutputFormat::Json => to_stdout(|w| write_json(w, &report)),
    }
}

fn print_human<W: Write>(w: &mut W, report: &[LocationStatus]) -> std::io::Result<()> {
    let width = report
        .iter()
        .map(|s| tag(&s.location).chars().count())
        .max()
        .unwrap_or(0);
    for status in report {
        let validity = if status.valid { "valid" } else { "unassigned" };
        writeln!(
            w,
            "{:<width$}  {validity:<10}  {}",
            tag(&status.location),
            status.count
        )?;
    }
    let valid = report.iter().filter(|s| s.valid).count();
    let pending: usize = report.iter().filter(|s| !s.valid).map(|s| s.count).sum();
    writeln!(w, "{valid} valid locations, {pending} records unassigned")
}
