//! The reference → updates → offers sequence shared by `reconcile` and
//! `locations`.
//!
//! Each step reads one workbook, imports it and produces the next
//! [`Dataset`] snapshot. The first failing step aborts the run; nothing is
//! written before the whole sequence succeeds.
use pricesync_core::{
    CellMatrix, Dataset, ImportError, OfferStats, PriceMergeStats, ReconcileConfig,
};

use crate::PathOrStdin;
use crate::error::CliError;
use crate::io::{check_single_stdin, load_matrix};

/// The workbooks of one run.
pub struct Sources<'a> {
    /// Reference catalogue.
    pub reference: &'a PathOrStdin,
    /// Optional price update list.
    pub updates: Option<&'a PathOrStdin>,
    /// Optional offer list.
    pub offers: Option<&'a PathOrStdin>,
}

/// How input workbooks are read.
#[derive(Clone, Copy)]
pub struct ReadOptions<'a> {
    /// Sheet to read from every workbook; the first sheet when `None`.
    pub sheet: Option<&'a str>,
    /// Input size limit in bytes.
    pub max_file_size: u64,
}

/// The final snapshot and the statistics of every step that ran.
pub struct PipelineOutput {
    /// The reconciled dataset.
    pub dataset: Dataset,
    /// Number of records imported from the reference catalogue.
    pub reference_records: usize,
    /// Price merge statistics, when an update list was given.
    pub price_stats: Option<PriceMergeStats>,
    /// Offer integration statistics, when an offer list was given.
    pub offer_stats: Option<OfferStats>,
}

/// Runs the import and merge steps in order.
///
/// # Errors
///
/// Returns [`CliError`] with exit code 2 when a workbook cannot be read and
/// exit code 1 when an importer rejects a sheet.
pub fn run(
    sources: &Sources<'_>,
    read: ReadOptions<'_>,
    config: &ReconcileConfig,
) -> Result<PipelineOutput, CliError> {
    check_single_stdin(
        std::iter::once(sources.reference)
            .chain(sources.updates)
            .chain(sources.offers),
    )?;

    let reference = load(sources.reference, read)?;
    let mut dataset = Dataset::from_reference(&reference, config)
        .map_err(|e| rejected(sources.reference, e))?;
    let reference_records = dataset.len();
    tracing::info!(
        records = reference_records,
        source = %sources.reference.label(),
        "reference imported"
    );

    let mut price_stats = None;
    if let Some(updates) = sources.updates {
        let matrix = load(updates, read)?;
        let (next, stats) = dataset
            .apply_update_sheet(&matrix, config)
            .map_err(|e| rejected(updates, e))?;
        tracing::info!(total = stats.total, changed = stats.changed, "price updates applied");
        dataset = next;
        price_stats = Some(stats);
    }

    let mut offer_stats = None;
    if let Some(offers) = sources.offers {
        let matrix = load(offers, read)?;
        let (next, stats) = dataset
            .integrate_offer_sheet(&matrix, config)
            .map_err(|e| rejected(offers, e))?;
        tracing::info!(
            integrated = stats.integrated,
            new_products = stats.new_products,
            updated = stats.updated,
            "offers integrated"
        );
        dataset = next;
        offer_stats = Some(stats);
    }

    Ok(PipelineOutput {
        dataset,
        reference_records,
        price_stats,
        offer_stats,
    })
}

fn load(source: &PathOrStdin, read: ReadOptions<'_>) -> Result<CellMatrix, CliError> {
    load_matrix(source, read.sheet, read.max_file_size)
}

fn rejected(source: &PathOrStdin, error: ImportError) -> CliError {
    CliError::ImportRejected {
        source: source.label(),
        error,
    }
}
