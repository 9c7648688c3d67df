//! Test-only, in-memory `RecordSource` used by unit and behaviour tests.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

use crate::{
    BugReport, Dataset, Device, DeviceTesterLink, RecordSource, Records, SourceError, TesterRecord,
};

/// In-memory `RecordSource` with failure injection.
///
/// Rows are yielded in insertion order. The source counts open row
/// iterators so tests can check every read releases its handle.
#[derive(Default, Debug)]
pub struct MemorySource {
    devices: Vec<Device>,
    links: Vec<DeviceTesterLink>,
    testers: Vec<TesterRecord>,
    bugs: Vec<BugReport>,
    headerless: BTreeSet<Dataset>,
    malformed: BTreeMap<Dataset, usize>,
    open_handles: Cell<usize>,
}

impl MemorySource {
    /// Append a device row.
    #[must_use]
    pub fn with_device(mut self, id: &str, description: &str) -> Self {
        self.devices.push(Device::new(id, description));
        self
    }

    /// Append a tester/device link row.
    #[must_use]
    pub fn with_link(mut self, tester_id: &str, device_id: &str) -> Self {
        self.links.push(DeviceTesterLink::new(tester_id, device_id));
        self
    }

    /// Append a tester row.
    #[must_use]
    pub fn with_tester(mut self, id: &str, first: &str, last: &str, country: &str) -> Self {
        self.testers.push(TesterRecord::new(id, first, last, country));
        self
    }

    /// Append a bug row filed by `tester_id`.
    #[must_use]
    pub fn with_bug(mut self, tester_id: &str) -> Self {
        let bug_id = (self.bugs.len() + 1).to_string();
        self.bugs.push(BugReport::new(bug_id, "", tester_id));
        self
    }

    /// Make `dataset` fail to open as if it had no header row.
    #[must_use]
    pub fn without_header(mut self, dataset: Dataset) -> Self {
        self.headerless.insert(dataset);
        self
    }

    /// Make the `row`th data row (zero-based) of `dataset` malformed.
    #[must_use]
    pub fn malformed_at(mut self, dataset: Dataset, row: usize) -> Self {
        self.malformed.insert(dataset, row);
        self
    }

    /// Number of row iterators currently alive.
    #[must_use]
    pub fn open_handles(&self) -> usize {
        self.open_handles.get()
    }

    fn open<'a, T: Clone + 'a>(
        &'a self,
        dataset: Dataset,
        rows: &'a [T],
    ) -> Result<Records<'a, T>, SourceError> {
        if self.headerless.contains(&dataset) {
            return Err(SourceError::MissingHeader {
                dataset,
                location: "memory".to_owned(),
            });
        }
        let malformed = self.malformed.get(&dataset).copied();
        let rows = rows.iter().enumerate().map(move |(index, row)| {
            if Some(index) == malformed {
                // Header occupies line 1.
                Err(SourceError::MalformedRow {
                    dataset,
                    line: index + 2,
                    expected: dataset.min_fields(),
                    found: 1,
                })
            } else {
                Ok(row.clone())
            }
        });
        Ok(Box::new(Handle::new(&self.open_handles, rows)))
    }
}

impl RecordSource for MemorySource {
    fn devices(&self) -> Result<Records<'_, Device>, SourceError> {
        self.open(Dataset::Devices, &self.devices)
    }

    fn tester_device_links(&self) -> Result<Records<'_, DeviceTesterLink>, SourceError> {
        self.open(Dataset::TesterDevice, &self.links)
    }

    fn testers(&self) -> Result<Records<'_, TesterRecord>, SourceError> {
        self.open(Dataset::Testers, &self.testers)
    }

    fn bug_reports(&self) -> Result<Records<'_, BugReport>, SourceError> {
        self.open(Dataset::Bugs, &self.bugs)
    }
}

struct Handle<'a, I> {
    counter: &'a Cell<usize>,
    rows: I,
}

impl<'a, I> Handle<'a, I> {
    fn new(counter: &'a Cell<usize>, rows: I) -> Self {
        counter.set(counter.get() + 1);
        Self { counter, rows }
    }
}

impl<I: Iterator> Iterator for Handle<'_, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }
}

impl<I> Drop for Handle<'_, I> {
    fn drop(&mut self) {
        self.counter.set(self.counter.get().saturating_sub(1));
    }
}

/// The worked example: two devices, three links, two testers, three bugs.
///
/// Selecting `iphone 5` ranks Ann Lee alone with two bugs.
#[must_use]
pub fn sample_source() -> MemorySource {
    MemorySource::default()
        .with_device("d1", "iPhone 5")
        .with_device("d2", "Galaxy S3")
        .with_link("t1", "d1")
        .with_link("t2", "d2")
        .with_link("t1", "d2")
        .with_tester("t1", "Ann", "Lee", "us")
        .with_tester("t2", "Bo", "Kim", "jp")
        .with_bug("t1")
        .with_bug("t1")
        .with_bug("t2")
}
