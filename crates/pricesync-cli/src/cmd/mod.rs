/// Command module for the `pricesync` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or
/// a [`crate::error::CliError`] on failure.
pub mod columns;
pub mod locations;
pub mod pipeline;
pub mod reconcile;
