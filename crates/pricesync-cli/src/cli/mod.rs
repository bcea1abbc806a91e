//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use pricesync_core::ReconcileConfig;

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read the workbook bytes from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl PathOrStdin {
    /// Label used in messages: the path, or `-` for stdin.
    pub fn label(&self) -> String {
        match self {
            Self::Stdin => "-".to_owned(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// A manual location assignment given as `CODE=LOCATION`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    /// Product code; normalized before matching.
    pub code: String,
    /// Location tag to assign.
    pub location: String,
}

impl std::str::FromStr for Assignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((code, location)) = s.split_once('=') else {
            return Err(format!("expected CODE=LOCATION, got {s:?}"));
        };
        let (code, location) = (code.trim(), location.trim());
        if code.is_empty() || location.is_empty() {
            return Err(format!("code and location must be non-empty in {s:?}"));
        }
        Ok(Self {
            code: code.to_owned(),
            location: location.to_owned(),
        })
    }
}

/// Output format for CLI commands.
///
/// `Human` emits aligned key/value text to stdout. `Json` emits a single
/// JSON document to stdout.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default).
    Human,
    /// Structured JSON output.
    Json,
}

/// Which importer's column rules `columns` should apply.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SheetRole {
    /// Reference catalogue: code, description, price, brand, location.
    Reference,
    /// Price update sheet: code and price.
    Update,
    /// Offer sheet: product name, price, optional location.
    Offers,
}

/// All top-level subcommands exposed by the `pricesync` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Reconcile a reference catalogue with price updates and offers.
    Reconcile {
        /// Reference catalogue workbook, or `-` for stdin.
        #[arg(value_name = "REFERENCE")]
        reference: PathOrStdin,
        /// Price update workbook (code and new price per row).
        #[arg(long, value_name = "FILE")]
        updates: Option<PathOrStdin>,
        /// Offer workbook (product name and offer price per row).
        #[arg(long, value_name = "FILE")]
        offers: Option<PathOrStdin>,
        /// Assign a location to every record with a code (repeatable).
        #[arg(long, value_name = "CODE=LOCATION")]
        assign: Vec<Assignment>,
        /// Write the reconciled records to a `.xlsx` or `.json` file.
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
        /// Add one sheet per valid location to `.xlsx` output.
        #[arg(long, requires = "output")]
        grouped: bool,
    },

    /// Show which column was identified for each role in a sheet.
    Columns {
        /// Workbook to inspect, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Column rules to apply: reference (default), update, or offers.
        #[arg(long, default_value = "reference", value_enum)]
        role: SheetRole,
    },

    /// List location tags with their validity and record counts.
    Locations {
        /// Reference catalogue workbook, or `-` for stdin.
        #[arg(value_name = "REFERENCE")]
        reference: PathOrStdin,
        /// Price update workbook applied before reporting.
        #[arg(long, value_name = "FILE")]
        updates: Option<PathOrStdin>,
        /// Offer workbook integrated before reporting.
        #[arg(long, value_name = "FILE")]
        offers: Option<PathOrStdin>,
    },
}

/// Root CLI struct for the `pricesync` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "pricesync",
    version,
    about = "Pharmacy price list reconciliation",
    long_about = "Reconciles a pharmacy reference catalogue with price update lists\n\
                  and supplier offers, then groups the result by furniture location."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Only log errors to stderr (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log column identification and merge details to stderr
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Sheet to read from every input workbook (default: the first sheet).
    #[arg(long, global = true, value_name = "NAME")]
    pub sheet: Option<String>,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `PRICESYNC_MAX_FILE_SIZE` environment variable.
    /// Default: 67108864 (64 MB).
    #[arg(
        long,
        global = true,
        env = "PRICESYNC_MAX_FILE_SIZE",
        default_value = "67108864"
    )]
    pub max_file_size: u64,

    /// Price difference above which a record counts as changed.
    #[arg(
        long,
        global = true,
        env = "PRICESYNC_CHANGE_TOLERANCE",
        default_value = "0.01"
    )]
    pub change_tolerance: f64,

    /// Prefix of codes synthesized for offers with no matching product.
    #[arg(
        long,
        global = true,
        env = "PRICESYNC_OFFER_CODE_PREFIX",
        default_value = "OF-"
    )]
    pub offer_code_prefix: String,

    /// Brand written on records synthesized from offers.
    #[arg(
        long,
        global = true,
        env = "PRICESYNC_OFFER_BRAND",
        default_value = "Oferta"
    )]
    pub offer_brand: String,

    /// Placeholder location for rows and offers without one.
    #[arg(
        long,
        global = true,
        env = "PRICESYNC_UNASSIGNED_LOCATION",
        default_value = pricesync_core::DEFAULT_UNASSIGNED_LOCATION
    )]
    pub unassigned_location: String,

    /// Keep offer rows whose price is zero or unparsable instead of dropping them.
    #[arg(long, global = true, env = "PRICESYNC_KEEP_ZERO_PRICE_OFFERS")]
    pub keep_zero_price_offers: bool,

    /// Disable ANSI color codes in human output and logs.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

impl Cli {
    /// Builds the reconciliation settings from the global flags.
    pub fn reconcile_config(&self) -> ReconcileConfig {
        ReconcileConfig {
            change_tolerance: self.change_tolerance,
            offer_code_prefix: self.offer_code_prefix.clone(),
            offer_brand: self.offer_brand.clone(),
            unassigned_location: self.unassigned_location.clone(),
            keep_zero_price_offers: self.keep_zero_price_offers,
        }
    }
}
