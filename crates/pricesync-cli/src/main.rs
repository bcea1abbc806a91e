mod cli;
mod cmd;
mod error;
mod format;
mod io;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

pub use cli::{Assignment, Cli, Command, OutputFormat, PathOrStdin, SheetRole};

use crate::cmd::pipeline::{ReadOptions, Sources};
use crate::cmd::reconcile::ReconcileArgs;
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(&cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

/// Installs the stderr log subscriber.
///
/// The default level is `warn`; `--verbose` raises it to `debug` and
/// `--quiet` lowers it to `error`. `RUST_LOG` directives override both.
fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else if cli.quiet {
        LevelFilter::ERROR
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(format::colors_enabled(cli.no_color))
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let read = ReadOptions {
        sheet: cli.sheet.as_deref(),
        max_file_size: cli.max_file_size,
    };
    let config = cli.reconcile_config();

    match &cli.command {
        Command::Reconcile {
            reference,
            updates,
            offers,
            assign,
            output,
            grouped,
        } => {
            let sources = Sources {
                reference,
                updates: updates.as_ref(),
                offers: offers.as_ref(),
            };
            let args = ReconcileArgs {
                assign,
                output: output.as_deref(),
                grouped: *grouped,
                format: cli.format,
            };
            cmd::reconcile::run(&sources, read, &config, &args)
        }
        Command::Columns { file, role } => cmd::columns::run(file, *role, read, cli.format),
        Command::Locations {
            reference,
            updates,
            offers,
        } => {
            let sources = Sources {
                reference,
                updates: updates.as_ref(),
                offers: offers.as_ref(),
            };
            cmd::locations::run(&sources, read, &config, cli.format)
        }
    }
}
