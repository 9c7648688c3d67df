//! Flat-file datasets: one header line followed by comma-separated rows.
//!
//! Quoting is not honoured. Every `"` is removed and the remainder is split
//! on `,`, so a quoted field containing a comma splits in two.
//!
//! Lines are read as raw bytes. The header is never decoded, and data rows
//! that are not valid UTF-8 are decoded lossily.

use std::io::{BufRead, BufReader, Split};

use bugrank_core::{
    BugReport, Dataset, Device, DeviceTesterLink, RecordSource, Records, SourceError, TesterRecord,
};
use bugrank_fs::open_utf8_file;
use cap_std::fs_utf8::File;
use log::{debug, warn};

use crate::DatasetPaths;

/// Split one data row into fields.
///
/// Empty fields are kept, including trailing ones. Field text is not
/// trimmed.
///
/// # Examples
///
/// ```
/// use bugrank_data::split_row;
///
/// assert_eq!(split_row("\"1\",\"iPhone 4\""), vec!["1", "iPhone 4"]);
/// assert_eq!(split_row("a,,b,"), vec!["a", "", "b", ""]);
/// ```
#[must_use]
pub fn split_row(line: &str) -> Vec<String> {
    line.replace('"', "")
        .split(',')
        .map(str::to_owned)
        .collect()
}

/// [`RecordSource`] over four CSV files.
///
/// Each call to a dataset accessor opens the file afresh; the handle lives
/// in the returned iterator.
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    paths: DatasetPaths,
}

impl CsvRecordSource {
    /// Read the datasets at `paths`.
    #[must_use]
    pub const fn new(paths: DatasetPaths) -> Self {
        Self { paths }
    }

    /// Dataset locations.
    #[must_use]
    pub const fn paths(&self) -> &DatasetPaths {
        &self.paths
    }

    fn rows<T: 'static>(
        &self,
        dataset: Dataset,
        build: fn(Vec<String>) -> T,
    ) -> Result<Records<'_, T>, SourceError> {
        let path = self.paths.path(dataset);
        let file = open_utf8_file(path).map_err(|source| SourceError::Open {
            dataset,
            location: path.to_string(),
            source,
        })?;
        let mut lines = BufReader::new(file).split(b'\n');
        match lines.next() {
            None => Err(SourceError::MissingHeader {
                dataset,
                location: path.to_string(),
            }),
            Some(Err(source)) => Err(SourceError::Read {
                dataset,
                line: 1,
                source,
            }),
            Some(Ok(_header)) => {
                debug!("reading {dataset} dataset from {path}");
                Ok(Box::new(Rows {
                    dataset,
                    lines,
                    line: 1,
                    build,
                }))
            }
        }
    }
}

impl RecordSource for CsvRecordSource {
    fn devices(&self) -> Result<Records<'_, Device>, SourceError> {
        self.rows(Dataset::Devices, |fields| {
            let mut fields = fields.into_iter();
            Device::new(
                fields.next().unwrap_or_default(),
                fields.next().unwrap_or_default(),
            )
        })
    }

    fn tester_device_links(&self) -> Result<Records<'_, DeviceTesterLink>, SourceError> {
        self.rows(Dataset::TesterDevice, |fields| {
            let mut fields = fields.into_iter();
            DeviceTesterLink::new(
                fields.next().unwrap_or_default(),
                fields.next().unwrap_or_default(),
            )
        })
    }

    fn testers(&self) -> Result<Records<'_, TesterRecord>, SourceError> {
        // Columns past the country (such as the last login) are ignored.
        self.rows(Dataset::Testers, |fields| {
            let mut fields = fields.into_iter();
            TesterRecord::new(
                fields.next().unwrap_or_default(),
                fields.next().unwrap_or_default(),
                fields.next().unwrap_or_default(),
                fields.next().unwrap_or_default(),
            )
        })
    }

    fn bug_reports(&self) -> Result<Records<'_, BugReport>, SourceError> {
        self.rows(Dataset::Bugs, |fields| {
            let mut fields = fields.into_iter();
            BugReport::new(
                fields.next().unwrap_or_default(),
                fields.next().unwrap_or_default(),
                fields.next().unwrap_or_default(),
            )
        })
    }
}

/// Row iterator owning the open file.
struct Rows<T> {
    dataset: Dataset,
    lines: Split<BufReader<File>>,
    line: usize,
    build: fn(Vec<String>) -> T,
}

impl<T> Iterator for Rows<T> {
    type Item = Result<T, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let read = self.lines.next()?;
            self.line += 1;
            let bytes = match read {
                Ok(bytes) => bytes,
                Err(source) => {
                    return Some(Err(SourceError::Read {
                        dataset: self.dataset,
                        line: self.line,
                        source,
                    }));
                }
            };
            let row = bytes.strip_suffix(b"\r").unwrap_or(bytes.as_slice());
            if row.is_empty() {
                warn!("skipping blank line {} of {} dataset", self.line, self.dataset);
                continue;
            }
            let fields = split_row(&String::from_utf8_lossy(row));
            let expected = self.dataset.min_fields();
            if fields.len() < expected {
                return Some(Err(SourceError::MalformedRow {
                    dataset: self.dataset,
                    line: self.line,
                    expected,
                    found: fields.len(),
                }));
            }
            return Some(Ok((self.build)(fields)));
        }
    }
}
