//! Import command: copy the flat-file datasets into a SQLite store.

use std::io::Write;

use bugrank_core::Dataset;
use bugrank_data::DatasetPaths;
use bugrank_fs::PathKind;
use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATA_DIR, ARG_OUTPUT, CliError, ENV_OUTPUT,
    rank::{DEFAULT_DATA_DIR, dataset_flag, require_existing},
};

/// CLI arguments for the `import` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Read the four flat-file datasets from a directory and \
                 write them into a SQLite database that `rank --store` can \
                 read. Existing dataset tables in the database are replaced.",
    about = "Copy the datasets into a SQLite store"
)]
#[ortho_config(prefix = "BUGRANK")]
pub(crate) struct ImportArgs {
    /// Directory containing the dataset files.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Destination SQLite database.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ImportArgs {
    fn into_config(self) -> Result<ImportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ImportConfig::try_from(merged)
    }
}

/// Resolved `import` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportConfig {
    pub(crate) paths: DatasetPaths,
    pub(crate) output: Utf8PathBuf,
}

impl ImportConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        for dataset in Dataset::ALL {
            require_existing(self.paths.path(dataset), dataset_flag(dataset))?;
        }
        match bugrank_fs::path_kind(&self.output) {
            Ok(PathKind::File) => Ok(()),
            Ok(PathKind::Directory | PathKind::Other) => Err(CliError::OutputNotFile {
                path: self.output.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_OUTPUT,
                path: self.output.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<ImportArgs> for ImportConfig {
    type Error = CliError;

    fn try_from(args: ImportArgs) -> Result<Self, Self::Error> {
        let output = args.output.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT,
            env: ENV_OUTPUT,
        })?;
        let data_dir = args
            .data_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR));
        Ok(Self {
            paths: DatasetPaths::in_dir(&data_dir),
            output,
        })
    }
}

pub(super) fn run_import(args: ImportArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_import_with(args, &mut stdout)
}

pub(super) fn run_import_with(args: ImportArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    execute_import(&config, writer)
}

#[cfg(feature = "store-sqlite")]
pub(crate) fn execute_import(config: &ImportConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let source = bugrank_data::CsvRecordSource::new(config.paths.clone());
    let summary = bugrank_data::persist_records(&source, &config.output).map_err(|err| {
        CliError::Import {
            path: config.output.clone(),
            source: err,
        }
    })?;
    writeln!(writer, "imported {summary} into {}", config.output).map_err(CliError::WriteOutput)
}

#[cfg(not(feature = "store-sqlite"))]
pub(crate) fn execute_import(
    _config: &ImportConfig,
    _writer: &mut dyn Write,
) -> Result<(), CliError> {
    Err(CliError::MissingFeature {
        feature: "store-sqlite",
        action: "importing datasets",
    })
}
