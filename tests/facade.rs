//! End-to-end ranking through the facade's re-exports.

#![cfg(feature = "csv-files")]

use std::fs;

use bugrank::{CsvRecordSource, Dataset, DatasetPaths, Pipeline, PipelineRequest, Selector};
use camino::{Utf8Path, Utf8PathBuf};
use rstest::rstest;
use tempfile::TempDir;

fn write_datasets(root: &Utf8Path) -> DatasetPaths {
    let paths = DatasetPaths::in_dir(root);
    let contents = [
        (Dataset::Devices, "deviceId,description\n1,iPhone 5\n2,Galaxy S3\n"),
        (Dataset::TesterDevice, "testerId,deviceId\n1,1\n2,2\n1,2\n"),
        (
            Dataset::Testers,
            "testerId,firstName,lastName,country,lastLogin\n1,Ann,Lee,US,x\n2,Bo,Kim,JP,y\n",
        ),
        (Dataset::Bugs, "bugId,deviceId,testerId\n1,1,1\n2,2,1\n3,2,2\n"),
    ];
    for (dataset, text) in contents {
        fs::write(paths.path(dataset), text).expect("write dataset");
    }
    paths
}

#[rstest]
#[case(Selector::All, vec!["Ann Lee=> 2"])]
#[case(Selector::case_folded(["jp"]), vec![])]
fn ranks_iphone_testers_by_country(#[case] countries: Selector, #[case] expected: Vec<&str>) {
    let dir = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path");
    let source = CsvRecordSource::new(write_datasets(&root));
    let request = PipelineRequest {
        devices: Selector::case_folded(["IPHONE 5"]),
        countries,
    };
    let ranked = Pipeline::new(&source).run(&request).expect("pipeline");
    let lines: Vec<String> = ranked.iter().map(ToString::to_string).collect();
    assert_eq!(lines, expected);
}
