//! End-to-end experience pipeline.

use bugrank_core::{RecordSource, Selector, TesterResult};
use log::debug;

use crate::{
    PipelineError, TesterDirectory, link_testers, rank, resolve_device_ids, tally_experience,
};

/// Selectors for a pipeline run.
///
/// Both selectors hold lower-cased values; descriptions and countries are
/// lower-cased before matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineRequest {
    /// Device descriptions to include.
    pub devices: Selector,
    /// Tester countries to include.
    pub countries: Selector,
}

/// Runs the five stages in order over one record source.
///
/// Each stage reads its dataset to completion before the next begins. The
/// first error aborts the run.
pub struct Pipeline<'s, S: ?Sized> {
    source: &'s S,
}

impl<'s, S> Pipeline<'s, S>
where
    S: RecordSource + ?Sized,
{
    /// Create a pipeline reading from `source`.
    #[must_use]
    pub const fn new(source: &'s S) -> Self {
        Self { source }
    }

    /// Rank the testers selected by `request`.
    ///
    /// # Errors
    /// Returns [`PipelineError`] when any dataset is missing, headerless or
    /// malformed.
    pub fn run(&self, request: &PipelineRequest) -> Result<Vec<TesterResult>, PipelineError> {
        let device_ids = resolve_device_ids(self.source, &request.devices)?;
        debug!("resolved {} device ids", device_ids.len());

        let tester_ids = link_testers(self.source, &Selector::only(device_ids))?;
        debug!("linked {} testers to the selected devices", tester_ids.len());

        let directory = TesterDirectory::resolve(self.source, &tester_ids, &request.countries)?;
        debug!("{} testers remain after the country filter", directory.len());

        let tally = tally_experience(self.source, Some(&directory))?;
        debug!("attributed {} bug reports", tally.total());

        Ok(rank(directory.into_results(&tally)))
    }
}
