//! Test helpers for writing dataset directories to disk.

use std::fs;

use bugrank_core::Dataset;
use bugrank_data::DatasetPaths;
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// The worked example: Ann Lee (US) filed two bugs, Bo Kim (JP) one.
const DEVICES: &str = "\"deviceId\",\"description\"\n\"1\",\"iPhone 5\"\n\"2\",\"Galaxy S3\"\n";
const LINKS: &str = "\"testerId\",\"deviceId\"\n\"1\",\"1\"\n\"2\",\"2\"\n\"1\",\"2\"\n";
const TESTERS: &str = "\"testerId\",\"firstName\",\"lastName\",\"country\",\"lastLogin\"\n\
\"1\",\"Ann\",\"Lee\",\"US\",\"2013-08-04 20:57:38\"\n\
\"2\",\"Bo\",\"Kim\",\"JP\",\"2013-07-12 13:27:36\"\n";
const BUGS: &str = "\"bugId\",\"deviceId\",\"testerId\"\n\"1\",\"1\",\"1\"\n\"2\",\"2\",\"1\"\n\"3\",\"2\",\"2\"\n";

#[derive(Debug)]
pub(super) struct DatasetDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl DatasetDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let datasets = Self { _dir: dir, root };
        datasets.write(Dataset::Devices, DEVICES);
        datasets.write(Dataset::TesterDevice, LINKS);
        datasets.write(Dataset::Testers, TESTERS);
        datasets.write(Dataset::Bugs, BUGS);
        datasets
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn paths(&self) -> DatasetPaths {
        DatasetPaths::in_dir(&self.root)
    }

    pub(super) fn write(&self, dataset: Dataset, contents: &str) {
        fs::write(self.paths().path(dataset), contents).expect("write dataset");
    }

    pub(super) fn remove(&self, dataset: Dataset) {
        fs::remove_file(self.paths().path(dataset)).expect("remove dataset");
    }
}

pub(super) fn rendered(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("utf-8 output")
}
