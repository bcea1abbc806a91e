//! Implementation of `pricesync reconcile <reference>`.
//!
//! Imports the reference catalogue, applies the optional price update list,
//! integrates the optional offer list and then the manual `--assign`
//! locations, in that order.
//!
//! In human mode a summary is printed to stdout: per-step counts, the
//! location tally and every changed product. In `--format json` mode the
//! reconciled records are printed as a JSON array.
//!
//! `--output` writes the records to `.xlsx` (flat, or one sheet per location
//! with `--grouped`) or `.json`, chosen by extension.
//!
//! Exit codes: 0 = success, 1 = sheet rejected or unknown code in
//! `--assign`, 2 = unreadable input, bad output path.
use std::io::Write;
use std::path::Path;

use pricesync_core::{Dataset, ProductRecord, ReconcileConfig, group_by_location};
use pricesync_excel::{export_grouped, export_records};

use super::pipeline::{self, PipelineOutput, ReadOptions, Sources};
use crate::error::CliError;
use crate::format::{price, signed, to_stdout, write_json};
use crate::io::write_file;
use crate::{Assignment, OutputFormat};

/// File formats accepted by `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Excel workbook.
    Xlsx,
    /// JSON document.
    Json,
}

impl OutputKind {
    /// Picks the format from the file extension, ignoring case.
    ///
    /// # Errors
    ///
    /// [`CliError::InvalidArgument`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, CliError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("xlsx") => Ok(Self::Xlsx),
            Some("json") => Ok(Self::Json),
            Some(_) | None => Err(CliError::InvalidArgument {
                detail: format!(
                    "unsupported output file {}: expected a .xlsx or .json extension",
                    path.display()
                ),
            }),
        }
    }
}

/// Options of one `reconcile` invocation beyond the input sources.
pub struct ReconcileArgs<'a> {
    /// Manual assignments, applied in order after the offers.
    pub assign: &'a [Assignment],
    /// Where to write the records, if anywhere.
    pub output: Option<&'a Path>,
    /// One sheet (or JSON group) per valid location.
    pub grouped: bool,
    /// Stdout format.
    pub format: OutputFormat,
}

/// Counts of the `--assign` step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AssignStats {
    /// Number of `--assign` arguments applied.
    pub applied: usize,
    /// Records whose location was set.
    pub records: usize,
}

/// Runs the `reconcile` command.
///
/// # Errors
///
/// Returns [`CliError`] on unreadable or rejected inputs, unknown codes in
/// `--assign`, and output failures.
pub fn run(
    sources: &Sources<'_>,
    read: ReadOptions<'_>,
    config: &ReconcileConfig,
    args: &ReconcileArgs<'_>,
) -> Result<(), CliError> {
    let output_kind = args.output.map(OutputKind::from_path).transpose()?;

    let out = pipeline::run(sources, read, config)?;
    let (dataset, assign_stats) = apply_assignments(&out.dataset, args.assign)?;

    if let (Some(path), Some(kind)) = (args.output, output_kind) {
        let bytes = render_output(&dataset, kind, args.grouped, path)?;
        write_file(path, &bytes)?;
        tracing::info!(path = %path.display(), records = dataset.len(), "output written");
    }

    match args.format {
        OutputFormat::Human => to_stdout(|w| {
            print_human(w, &out, &dataset, assign_stats, config, args.output)
        }),
        OutputFormat::Json => to_stdout(|w| write_json(w, &dataset)),
    }
}

/// Applies `--assign` arguments in order.
///
/// # Errors
///
/// [`CliError::AssignmentFailed`] on the first unknown code.
pub fn apply_assignments(
    dataset: &Dataset,
    assignments: &[Assignment],
) -> Result<(Dataset, AssignStats), CliError> {
    let mut current = dataset.clone();
    let mut stats = AssignStats::default();
    for a in assignments {
        let (next, touched) = current.assign_location(&a.code, &a.location)?;
        current = next;
        stats.applied += 1;
        stats.records += touched;
    }
    Ok((current, stats))
}

fn render_output(
    dataset: &Dataset,
    kind: OutputKind,
    grouped: bool,
    path: &Path,
) -> Result<Vec<u8>, CliError> {
    let mut buf: Vec<u8> = Vec::new();
    let export_failed = |detail: String| CliError::IoError {
        source: path.display().to_string(),
        detail,
    };
    match (kind, grouped) {
        (OutputKind::Xlsx, false) => export_records(dataset.records(), &mut buf)
            .map_err(|e| export_failed(e.to_string()))?,
        (OutputKind::Xlsx, true) => export_grouped(dataset.records(), &mut buf)
            .map_err(|e| export_failed(e.to_string()))?,
        (OutputKind::Json, false) => {
            write_json(&mut buf, dataset).map_err(|e| export_failed(e.to_string()))?;
        }
        (OutputKind::Json, true) => {
            write_json(&mut buf, &dataset.groups()).map_err(|e| export_failed(e.to_string()))?;
        }
    }
    Ok(buf)
}

/// Writes the reconciliation summary in aligned `key: value` form.
fn print_human<W: Write>(
    w: &mut W,
    out: &PipelineOutput,
    dataset: &Dataset,
    assign: AssignStats,
    config: &ReconcileConfig,
    output: Option<&Path>,
) -> std::io::Result<()> {
    writeln!(w, "reference:    {} products", out.reference_records)?;
    if let Some(stats) = out.price_stats {
        writeln!(
            w,
            "updates:      {} checked, {} changed",
            stats.total, stats.changed
        )?;
    }
    if let Some(stats) = out.offer_stats {
        writeln!(
            w,
            "offers:       {} integrated ({} new, {} updated)",
            stats.integrated, stats.new_products, stats.updated
        )?;
    }
    if assign.applied > 0 {
        writeln!(
            w,
            "assigned:     {} codes, {} records",
            assign.applied, assign.records
        )?;
    }
    let groups = group_by_location(dataset.records());
    writeln!(
        w,
        "locations:    {} valid, {} records unassigned",
        groups.len(),
        dataset.unassigned().len()
    )?;
    writeln!(w, "products:     {}", dataset.len())?;
    if let Some(path) = output {
        writeln!(w, "output:       {}", path.display())?;
    }

    let changed = dataset.changed(config);
    writeln!(w, "changed:      {}", changed.len())?;
    for record in changed {
        write_changed_line(w, record)?;
    }
    Ok(())
}

fn write_changed_line<W: Write>(w: &mut W, record: &ProductRecord) -> std::io::Result<()> {
    let offer = if record.is_offer { "  [offer]" } else { "" };
    writeln!(
        w,
        "  {}  {}  {} -> {}  {}  {}{offer}",
        record.code,
        record.description,
        price(record.previous_price()),
        price(record.updated_price()),
        signed(record.delta()),
        record.percent_change(),
    )
}
