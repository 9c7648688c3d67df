//! Tester directory: the join of linked testers and selected countries.

use std::collections::{BTreeMap, HashSet};

use bugrank_core::{RecordSource, Selector, SourceError, TesterRecord, TesterResult};

use crate::ExperienceTally;

/// Tester identities keyed by tester id.
///
/// Keys iterate in ascending id order, so output built from a directory is
/// reproducible across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TesterDirectory {
    entries: BTreeMap<String, TesterRecord>,
}

impl TesterDirectory {
    /// Build the directory from the testers dataset.
    ///
    /// A tester row is admitted when its id is in `tester_ids` and its
    /// country, lower-cased, passes `countries`. When the dataset repeats an
    /// admitted id, the later row replaces the earlier one.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the testers dataset cannot be opened, has
    /// no header, or contains a malformed row.
    pub fn resolve<S>(
        source: &S,
        tester_ids: &[String],
        countries: &Selector,
    ) -> Result<Self, SourceError>
    where
        S: RecordSource + ?Sized,
    {
        let wanted: HashSet<&str> = tester_ids.iter().map(String::as_str).collect();
        let mut entries = BTreeMap::new();
        for row in source.testers()? {
            let tester = row?;
            if wanted.contains(tester.tester_id.as_str()) && countries.admits_folded(&tester.country)
            {
                entries.insert(tester.tester_id.clone(), tester);
            }
        }
        Ok(Self { entries })
    }

    /// Look up a tester by id.
    #[must_use]
    pub fn get(&self, tester_id: &str) -> Option<&TesterRecord> {
        self.entries.get(tester_id)
    }

    /// Whether `tester_id` is in the directory.
    #[must_use]
    pub fn contains(&self, tester_id: &str) -> bool {
        self.entries.contains_key(tester_id)
    }

    /// Number of testers in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tester ids in ascending order.
    pub fn tester_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Tester records in ascending id order.
    pub fn records(&self) -> impl Iterator<Item = &TesterRecord> {
        self.entries.values()
    }

    /// Pair every tester with its score from `tally`.
    ///
    /// Testers missing from the tally score zero. Results come back in
    /// ascending id order; pass them to [`rank`](crate::rank) to order by
    /// score.
    #[must_use]
    pub fn into_results(self, tally: &ExperienceTally) -> Vec<TesterResult> {
        self.entries
            .into_iter()
            .map(|(tester_id, record)| {
                let score = tally.score(&tester_id).unwrap_or(0);
                TesterResult::new(tester_id, record.display_name(), score)
            })
            .collect()
    }
}

impl FromIterator<TesterRecord> for TesterDirectory {
    fn from_iter<I: IntoIterator<Item = TesterRecord>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|record| (record.tester_id.clone(), record))
                .collect(),
        }
    }
}
