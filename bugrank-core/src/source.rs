//! Read access to the four datasets behind the pipeline.
//!
//! The `RecordSource` trait lets the pipeline run unchanged over flat files,
//! a database, or an in-memory fixture.

use crate::{BugReport, Device, DeviceTesterLink, SourceError, TesterRecord};

/// Rows of one dataset, read lazily in source order.
///
/// The iterator owns whatever handle backs the read; dropping it releases the
/// handle, whether the read ran to completion or stopped at an error.
pub type Records<'a, T> = Box<dyn Iterator<Item = Result<T, SourceError>> + 'a>;

/// Read-only access to the device, link, tester and bug datasets.
///
/// Each method acquires the dataset afresh. Failing to acquire it (missing,
/// unreadable, no header) is reported by the outer `Result`; failures while
/// reading rows are yielded by the iterator.
///
/// # Examples
///
/// ```rust
/// use bugrank_core::{
///     BugReport, Device, DeviceTesterLink, RecordSource, Records, SourceError, TesterRecord,
/// };
///
/// struct OneDevice;
///
/// impl RecordSource for OneDevice {
///     fn devices(&self) -> Result<Records<'_, Device>, SourceError> {
///         Ok(Box::new(std::iter::once(Ok(Device::new("d1", "iPhone 5")))))
///     }
///     fn tester_device_links(&self) -> Result<Records<'_, DeviceTesterLink>, SourceError> {
///         Ok(Box::new(std::iter::empty()))
///     }
///     fn testers(&self) -> Result<Records<'_, TesterRecord>, SourceError> {
///         Ok(Box::new(std::iter::empty()))
///     }
///     fn bug_reports(&self) -> Result<Records<'_, BugReport>, SourceError> {
///         Ok(Box::new(std::iter::empty()))
///     }
/// }
///
/// # fn main() -> Result<(), SourceError> {
/// let ids: Vec<String> = OneDevice
///     .devices()?
///     .map(|row| row.map(|device| device.id))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(ids, vec!["d1".to_owned()]);
/// # Ok(())
/// # }
/// ```
pub trait RecordSource {
    /// Rows of the devices dataset.
    fn devices(&self) -> Result<Records<'_, Device>, SourceError>;

    /// Rows of the tester/device link dataset.
    fn tester_device_links(&self) -> Result<Records<'_, DeviceTesterLink>, SourceError>;

    /// Rows of the testers dataset.
    fn testers(&self) -> Result<Records<'_, TesterRecord>, SourceError>;

    /// Rows of the bug report dataset.
    fn bug_reports(&self) -> Result<Records<'_, BugReport>, SourceError>;
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn devices(&self) -> Result<Records<'_, Device>, SourceError> {
        (**self).devices()
    }

    fn tester_device_links(&self) -> Result<Records<'_, DeviceTesterLink>, SourceError> {
        (**self).tester_device_links()
    }

    fn testers(&self) -> Result<Records<'_, TesterRecord>, SourceError> {
        (**self).testers()
    }

    fn bug_reports(&self) -> Result<Records<'_, BugReport>, SourceError> {
        (**self).bug_reports()
    }
}

#[cfg(test)]
mod tests {
    use super::RecordSource;
    use crate::{Dataset, SourceError, test_support::MemorySource};
    use rstest::rstest;

    #[rstest]
    fn yields_rows_in_insertion_order() {
        let source = MemorySource::default()
            .with_device("d2", "Galaxy S3")
            .with_device("d1", "iPhone 5");
        let ids: Vec<_> = source
            .devices()
            .expect("devices available")
            .map(|row| row.expect("row").id)
            .collect();
        assert_eq!(ids, vec!["d2", "d1"]);
    }

    #[rstest]
    fn headerless_dataset_fails_to_open() {
        let source = MemorySource::default().without_header(Dataset::Bugs);
        match source.bug_reports() {
            Err(SourceError::MissingHeader { dataset, .. }) => assert_eq!(dataset, Dataset::Bugs),
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => panic!("expected the bugs dataset to be rejected"),
        }
    }

    #[rstest]
    fn boxed_sources_delegate() {
        let source: Box<dyn RecordSource> =
            Box::new(MemorySource::default().with_tester("t1", "Ann", "Lee", "us"));
        assert_eq!(source.testers().expect("testers").count(), 1);
    }
}
