//! Locations of the four flat-file datasets.

use bugrank_core::Dataset;
use camino::{Utf8Path, Utf8PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where each dataset file lives.
///
/// # Examples
///
/// ```
/// use bugrank_core::Dataset;
/// use bugrank_data::DatasetPaths;
/// use camino::Utf8Path;
///
/// let paths = DatasetPaths::in_dir(Utf8Path::new("file"));
/// assert_eq!(paths.path(Dataset::TesterDevice), "file/tester_device.csv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DatasetPaths {
    /// Devices dataset.
    pub devices: Utf8PathBuf,
    /// Tester/device link dataset.
    pub tester_device: Utf8PathBuf,
    /// Testers dataset.
    pub testers: Utf8PathBuf,
    /// Bug report dataset.
    pub bugs: Utf8PathBuf,
}

impl DatasetPaths {
    /// Default file name for `dataset`.
    #[must_use]
    pub const fn default_file_name(dataset: Dataset) -> &'static str {
        match dataset {
            Dataset::Devices => "devices.csv",
            Dataset::TesterDevice => "tester_device.csv",
            Dataset::Testers => "testers.csv",
            Dataset::Bugs => "bugs.csv",
        }
    }

    /// Every dataset under `dir` with its default file name.
    #[must_use]
    pub fn in_dir(dir: &Utf8Path) -> Self {
        let at = |dataset| dir.join(Self::default_file_name(dataset));
        Self {
            devices: at(Dataset::Devices),
            tester_device: at(Dataset::TesterDevice),
            testers: at(Dataset::Testers),
            bugs: at(Dataset::Bugs),
        }
    }

    /// Path of `dataset`.
    #[must_use]
    pub fn path(&self, dataset: Dataset) -> &Utf8Path {
        match dataset {
            Dataset::Devices => &self.devices,
            Dataset::TesterDevice => &self.tester_device,
            Dataset::Testers => &self.testers,
            Dataset::Bugs => &self.bugs,
        }
    }

    /// Replace the path of `dataset`.
    #[must_use]
    pub fn with_path(mut self, dataset: Dataset, path: Utf8PathBuf) -> Self {
        match dataset {
            Dataset::Devices => self.devices = path,
            Dataset::TesterDevice => self.tester_device = path,
            Dataset::Testers => self.testers = path,
            Dataset::Bugs => self.bugs = path,
        }
        self
    }
}
