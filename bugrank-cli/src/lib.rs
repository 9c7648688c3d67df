//! Command-line interface for ranking testers by experience.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod import;
mod rank;

pub use error::CliError;

use import::{ImportArgs, run_import};
use rank::{RankArgs, run_rank};

pub(crate) const ARG_COUNTRIES: &str = "countries";
pub(crate) const ARG_DEVICES: &str = "devices";
pub(crate) const ARG_DATA_DIR: &str = "data-dir";
pub(crate) const ARG_DEVICES_FILE: &str = "devices-file";
pub(crate) const ARG_TESTER_DEVICE_FILE: &str = "tester-device-file";
pub(crate) const ARG_TESTERS_FILE: &str = "testers-file";
pub(crate) const ARG_BUGS_FILE: &str = "bugs-file";
pub(crate) const ARG_STORE: &str = "store";
pub(crate) const ARG_FORMAT: &str = "format";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ENV_OUTPUT: &str = "BUGRANK_CMDS_IMPORT_OUTPUT";

/// Run the bugrank CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, a
/// dataset cannot be read, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => run_rank(args),
        Command::Import(args) => run_import(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "bugrank",
    about = "Rank testers by the bugs they have filed on selected devices",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank testers in the selected countries by bugs filed on the selected devices.
    Rank(RankArgs),
    /// Copy the flat-file datasets into a SQLite store.
    Import(ImportArgs),
}

#[cfg(test)]
mod tests;
