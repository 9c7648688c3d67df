//! Focused unit tests covering rank configuration, execution, and output.

use super::helpers::{DatasetDir, rendered};
use super::*;
use crate::rank::{
    OutputFormat, RESULTS_BANNER, RankArgs, RankConfig, SourceConfig, execute_rank,
    selector_from, write_results,
};
use bugrank_core::{Dataset, Selector, SourceError, TesterResult};
use bugrank_data::DatasetPaths;
use bugrank_scorer::{PipelineError, PipelineRequest};
use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};

#[fixture]
fn datasets() -> DatasetDir {
    DatasetDir::new()
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

fn files_config(datasets: &DatasetDir, devices: &[&str], countries: &[&str]) -> RankConfig {
    RankConfig {
        request: PipelineRequest {
            devices: selector_from(&owned(devices)),
            countries: selector_from(&owned(countries)),
        },
        source: SourceConfig::Files(datasets.paths()),
        format: OutputFormat::Text,
    }
}

fn parse_rank(args: &[&str]) -> RankArgs {
    let invocation = ["bugrank", "rank"].iter().chain(args);
    match Cli::try_parse_from(invocation).expect("arguments parse").command {
        Command::Rank(rank) => rank,
        Command::Import(_) => panic!("expected the rank command"),
    }
}

#[rstest]
#[case(&[], Selector::All)]
#[case(&["ALL"], Selector::All)]
#[case(&["US", "all"], Selector::All)]
#[case(&["US", "Jp"], Selector::only(["us", "jp"]))]
fn selectors_fold_case_and_honour_all(#[case] values: &[&str], #[case] expected: Selector) {
    assert_eq!(selector_from(&owned(values)), expected);
}

#[rstest]
fn parses_repeated_and_delimited_selectors() {
    let spaced = parse_rank(&["--countries", "US", "JP", "--devices", "iPhone 5"]);
    let delimited = parse_rank(&["--countries", "US,JP", "--devices", "iPhone 5"]);
    assert_eq!(spaced.countries, vec!["US", "JP"]);
    assert_eq!(delimited.countries, spaced.countries);
    assert_eq!(spaced.devices, vec!["iPhone 5"]);
}

#[rstest]
fn parses_the_output_format() {
    let args = parse_rank(&["--format", "json"]);
    assert_eq!(args.format, Some(OutputFormat::Json));
}

#[rstest]
fn config_defaults_to_the_file_directory() {
    let config = RankConfig::try_from(RankArgs::default()).expect("config should build");
    assert_eq!(config.request, PipelineRequest::default());
    assert_eq!(config.format, OutputFormat::Text);
    assert_eq!(
        config.source,
        SourceConfig::Files(DatasetPaths::in_dir(Utf8Path::new("file")))
    );
}

#[rstest]
fn config_applies_per_dataset_overrides() {
    let args = RankArgs {
        data_dir: Some(Utf8PathBuf::from("/data")),
        bugs_file: Some(Utf8PathBuf::from("/archive/bugs.csv")),
        ..RankArgs::default()
    };
    let config = RankConfig::try_from(args).expect("config should build");
    match config.source {
        SourceConfig::Files(paths) => {
            assert_eq!(paths.path(Dataset::Bugs), "/archive/bugs.csv");
            assert_eq!(paths.path(Dataset::Devices), "/data/devices.csv");
        }
        SourceConfig::Store(path) => panic!("expected flat files, found store {path}"),
    }
}

#[rstest]
fn stores_cannot_be_combined_with_dataset_files() {
    let args = RankArgs {
        store: Some(Utf8PathBuf::from("bugrank.db")),
        testers_file: Some(Utf8PathBuf::from("testers.csv")),
        ..RankArgs::default()
    };
    let err = RankConfig::try_from(args).expect_err("conflicting sources");
    match err {
        CliError::ConflictingSources { other, .. } => assert_eq!(other, ARG_TESTERS_FILE),
        other => panic!("expected ConflictingSources, found {other:?}"),
    }
}

#[rstest]
#[case(Dataset::Devices, ARG_DEVICES_FILE)]
#[case(Dataset::TesterDevice, ARG_TESTER_DEVICE_FILE)]
#[case(Dataset::Testers, ARG_TESTERS_FILE)]
#[case(Dataset::Bugs, ARG_BUGS_FILE)]
fn validate_sources_reports_missing_datasets(
    datasets: DatasetDir,
    #[case] missing: Dataset,
    #[case] expected_field: &'static str,
) {
    datasets.remove(missing);
    let err = files_config(&datasets, &[], &[])
        .validate_sources()
        .expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, expected_field),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories(datasets: DatasetDir) {
    let config = RankConfig {
        source: SourceConfig::Store(datasets.root().to_path_buf()),
        ..files_config(&datasets, &[], &[])
    };
    let err = config.validate_sources().expect_err("directory store");
    match err {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_STORE),
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
#[case(&["iPhone 5"], &["all"], "Ann Lee=> 2\n")]
#[case(&["all"], &["all"], "Bo Kim=> 1\nAnn Lee=> 2\n")]
#[case(&["galaxy s3"], &["jp"], "Bo Kim=> 1\n")]
#[case(&["nexus 4"], &["all"], "")]
fn ranks_and_prints_text(
    datasets: DatasetDir,
    #[case] devices: &[&str],
    #[case] countries: &[&str],
    #[case] expected: &str,
) {
    let config = files_config(&datasets, devices, countries);
    let results = execute_rank(&config).expect("rank runs");
    let mut output = Vec::new();
    write_results(&mut output, &results, config.format).expect("write results");
    assert_eq!(rendered(output), format!("{RESULTS_BANNER}\n{expected}"));
}

#[rstest]
fn prints_json_results() {
    let results = vec![TesterResult::new("1", "Ann Lee", 2)];
    let mut output = Vec::new();
    write_results(&mut output, &results, OutputFormat::Json).expect("write results");
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(
        value,
        serde_json::json!([
            { "tester_id": "1", "display_name": "Ann Lee", "experience_score": 2 }
        ])
    );
}

#[rstest]
fn malformed_rows_surface_as_pipeline_errors(datasets: DatasetDir) {
    datasets.write(Dataset::Bugs, "bugId,deviceId,testerId\n1,1\n");
    let err = execute_rank(&files_config(&datasets, &[], &[])).expect_err("malformed bugs");
    assert!(matches!(
        err,
        CliError::Pipeline(PipelineError::Source(SourceError::MalformedRow { line: 2, .. }))
    ));
    assert_eq!(
        err.to_string(),
        "line 2 of the bugs dataset has 2 fields, expected at least 3"
    );
}

#[cfg(feature = "store-sqlite")]
#[rstest]
fn ranks_from_an_imported_store(datasets: DatasetDir) {
    let store = datasets.root().join("store/bugrank.db");
    bugrank_data::persist_records(&bugrank_data::CsvRecordSource::new(datasets.paths()), &store)
        .expect("import");
    let from_files = execute_rank(&files_config(&datasets, &[], &[])).expect("file run");
    let from_store = execute_rank(&RankConfig {
        source: SourceConfig::Store(store),
        ..files_config(&datasets, &[], &[])
    })
    .expect("store run");
    assert_eq!(from_store, from_files);
}
