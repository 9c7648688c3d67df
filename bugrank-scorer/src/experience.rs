//! Experience tally: bug reports counted per tester.

use std::collections::BTreeMap;

use bugrank_core::RecordSource;
use log::debug;

use crate::{PipelineError, TesterDirectory};

/// Bug report counts keyed by tester id.
///
/// Holds an entry, possibly zero, for every tester in the directory the tally
/// was computed against, and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceTally {
    counts: BTreeMap<String, u64>,
}

impl ExperienceTally {
    /// Score for `tester_id`, or `None` when the tester was not tallied.
    #[must_use]
    pub fn score(&self, tester_id: &str) -> Option<u64> {
        self.counts.get(tester_id).copied()
    }

    /// Number of tallied testers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no testers were tallied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of every tallied score.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `(tester_id, score)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(id, count)| (id.as_str(), *count))
    }
}

/// Count the bug reports filed by each tester in `directory`.
///
/// Reports filed by testers outside the directory are ignored. The directory
/// is not modified.
///
/// # Errors
/// Returns [`PipelineError::MissingDirectory`] when `directory` is `None`,
/// before the bug dataset is opened. Returns [`PipelineError::Source`] when
/// the bug dataset cannot be opened, has no header, or contains a malformed
/// row.
pub fn tally_experience<S>(
    source: &S,
    directory: Option<&TesterDirectory>,
) -> Result<ExperienceTally, PipelineError>
where
    S: RecordSource + ?Sized,
{
    let Some(known) = directory else {
        return Err(PipelineError::MissingDirectory);
    };
    let mut counts: BTreeMap<String, u64> = known
        .tester_ids()
        .map(|id| (id.to_owned(), 0))
        .collect();

    let mut ignored = 0_u64;
    for row in source.bug_reports()? {
        let bug = row?;
        match counts.get_mut(bug.tester_id.as_str()) {
            Some(count) => *count += 1,
            None => ignored += 1,
        }
    }
    debug!("ignored {ignored} bug reports from testers outside the directory");

    Ok(ExperienceTally { counts })
}
