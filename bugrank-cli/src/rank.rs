//! Rank command implementation for the bugrank CLI.

use std::io::Write;

use bugrank_core::{Dataset, RecordSource, Selector, TesterResult};
use bugrank_data::{CsvRecordSource, DatasetPaths};
use bugrank_scorer::{Pipeline, PipelineRequest};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_BUGS_FILE, ARG_COUNTRIES, ARG_DATA_DIR, ARG_DEVICES, ARG_DEVICES_FILE, ARG_FORMAT,
    ARG_STORE, ARG_TESTER_DEVICE_FILE, ARG_TESTERS_FILE, CliError,
};

/// Banner printed above text results.
pub(crate) const RESULTS_BANNER: &str = "----------RESULTS-------------";

/// Directory holding the datasets when `--data-dir` is not given.
pub(crate) const DEFAULT_DATA_DIR: &str = "file";

/// Keyword that disables a selector.
const SELECT_ALL: &str = "all";

/// How ranked results are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// A banner followed by one `Name=> score` line per tester.
    #[default]
    Text,
    /// A pretty-printed JSON array.
    Json,
}

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank testers by the number of bugs they filed against the \
                 selected devices, least experienced first. Selectors accept \
                 several values, separated by spaces or commas; `all` \
                 disables a selector. Dataset paths can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Rank testers by experience"
)]
#[ortho_config(prefix = "BUGRANK")]
pub(crate) struct RankArgs {
    /// Countries to include, or `all`.
    #[arg(long = ARG_COUNTRIES, value_name = "country", num_args = 1.., value_delimiter = ',')]
    #[serde(default)]
    pub(crate) countries: Vec<String>,
    /// Device descriptions to include, or `all`.
    #[arg(long = ARG_DEVICES, value_name = "device", num_args = 1.., value_delimiter = ',')]
    #[serde(default)]
    pub(crate) devices: Vec<String>,
    /// Directory containing the default dataset file names.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Override the path to `devices.csv`.
    #[arg(long = ARG_DEVICES_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) devices_file: Option<Utf8PathBuf>,
    /// Override the path to `tester_device.csv`.
    #[arg(long = ARG_TESTER_DEVICE_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) tester_device_file: Option<Utf8PathBuf>,
    /// Override the path to `testers.csv`.
    #[arg(long = ARG_TESTERS_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) testers_file: Option<Utf8PathBuf>,
    /// Override the path to `bugs.csv`.
    #[arg(long = ARG_BUGS_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) bugs_file: Option<Utf8PathBuf>,
    /// Read every dataset from a SQLite store written by `import`.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
    /// Output format.
    #[arg(long = ARG_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }

    fn first_dataset_flag(&self) -> Option<&'static str> {
        [
            (ARG_DATA_DIR, self.data_dir.is_some()),
            (ARG_DEVICES_FILE, self.devices_file.is_some()),
            (ARG_TESTER_DEVICE_FILE, self.tester_device_file.is_some()),
            (ARG_TESTERS_FILE, self.testers_file.is_some()),
            (ARG_BUGS_FILE, self.bugs_file.is_some()),
        ]
        .into_iter()
        .find_map(|(flag, set)| set.then_some(flag))
    }
}

/// Where the rank command reads its datasets from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceConfig {
    /// Four flat files.
    Files(DatasetPaths),
    /// A SQLite store.
    Store(Utf8PathBuf),
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) request: PipelineRequest,
    pub(crate) source: SourceConfig,
    pub(crate) format: OutputFormat,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        match &self.source {
            SourceConfig::Files(paths) => Dataset::ALL.into_iter().try_for_each(|dataset| {
                require_existing(paths.path(dataset), dataset_flag(dataset))
            }),
            SourceConfig::Store(path) => require_existing(path, ARG_STORE),
        }
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        if args.store.is_some()
            && let Some(other) = args.first_dataset_flag()
        {
            return Err(CliError::ConflictingSources {
                store: ARG_STORE,
                other,
            });
        }

        let request = PipelineRequest {
            devices: selector_from(&args.devices),
            countries: selector_from(&args.countries),
        };
        let format = args.format.unwrap_or_default();
        let source = if let Some(store) = args.store {
            SourceConfig::Store(store)
        } else {
            let data_dir = args
                .data_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR));
            SourceConfig::Files(override_paths(
                DatasetPaths::in_dir(&data_dir),
                [
                    (Dataset::Devices, args.devices_file),
                    (Dataset::TesterDevice, args.tester_device_file),
                    (Dataset::Testers, args.testers_file),
                    (Dataset::Bugs, args.bugs_file),
                ],
            ))
        };

        Ok(Self {
            request,
            source,
            format,
        })
    }
}

/// Build a selector from raw CLI values.
///
/// No values, or any value equal to `all` in any case, selects everything.
pub(crate) fn selector_from(values: &[String]) -> Selector {
    if values.is_empty()
        || values
            .iter()
            .any(|value| value.eq_ignore_ascii_case(SELECT_ALL))
    {
        Selector::All
    } else {
        Selector::case_folded(values)
    }
}

fn override_paths(
    defaults: DatasetPaths,
    overrides: [(Dataset, Option<Utf8PathBuf>); 4],
) -> DatasetPaths {
    overrides
        .into_iter()
        .fold(defaults, |paths, (dataset, path)| match path {
            Some(custom) => paths.with_path(dataset, custom),
            None => paths,
        })
}

pub(crate) const fn dataset_flag(dataset: Dataset) -> &'static str {
    match dataset {
        Dataset::Devices => ARG_DEVICES_FILE,
        Dataset::TesterDevice => ARG_TESTER_DEVICE_FILE,
        Dataset::Testers => ARG_TESTERS_FILE,
        Dataset::Bugs => ARG_BUGS_FILE,
    }
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match bugrank_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub(super) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &mut stdout)
}

pub(super) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_rank_config(args)?;
    let results = execute_rank(&config)?;
    write_results(writer, &results, config.format)
}

fn resolve_rank_config(args: RankArgs) -> Result<RankConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Run the pipeline against the configured datasets.
pub(crate) fn execute_rank(config: &RankConfig) -> Result<Vec<TesterResult>, CliError> {
    debug!("ranking with {:?}", config.request);
    match &config.source {
        SourceConfig::Files(paths) => {
            rank_source(&CsvRecordSource::new(paths.clone()), &config.request)
        }
        SourceConfig::Store(path) => rank_store(path, &config.request),
    }
}

#[cfg(feature = "store-sqlite")]
fn rank_store(path: &Utf8Path, request: &PipelineRequest) -> Result<Vec<TesterResult>, CliError> {
    let store = bugrank_data::SqliteRecordSource::open(path)?;
    rank_source(&store, request)
}

#[cfg(not(feature = "store-sqlite"))]
fn rank_store(_path: &Utf8Path, _request: &PipelineRequest) -> Result<Vec<TesterResult>, CliError> {
    Err(CliError::MissingFeature {
        feature: "store-sqlite",
        action: "reading a SQLite store",
    })
}

fn rank_source(
    source: &dyn RecordSource,
    request: &PipelineRequest,
) -> Result<Vec<TesterResult>, CliError> {
    Ok(Pipeline::new(source).run(request)?)
}

pub(crate) fn write_results(
    writer: &mut dyn Write,
    results: &[TesterResult],
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => {
            writeln!(writer, "{RESULTS_BANNER}").map_err(CliError::WriteOutput)?;
            for result in results {
                writeln!(writer, "{result}").map_err(CliError::WriteOutput)?;
            }
        }
        OutputFormat::Json => {
            let payload =
                serde_json::to_string_pretty(results).map_err(CliError::SerialiseResults)?;
            writer
                .write_all(payload.as_bytes())
                .map_err(CliError::WriteOutput)?;
            writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
        }
    }
    Ok(())
}
