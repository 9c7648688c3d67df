//! Ranking: order testers by experience.

use std::cmp::Ordering;

use bugrank_core::TesterResult;

/// Order by ascending experience score, then by ascending tester id.
///
/// The id tie-break makes the ranking independent of the order results were
/// produced in.
#[must_use]
pub fn compare_experience(lhs: &TesterResult, rhs: &TesterResult) -> Ordering {
    lhs.experience_score
        .cmp(&rhs.experience_score)
        .then_with(|| lhs.tester_id.cmp(&rhs.tester_id))
}

/// Sort `results` with [`compare_experience`].
#[must_use]
pub fn rank(results: Vec<TesterResult>) -> Vec<TesterResult> {
    rank_by(results, compare_experience)
}

/// Sort `results` with a caller-supplied comparator.
///
/// The sort is stable: results the comparator considers equal keep their
/// input order.
#[must_use]
pub fn rank_by<F>(mut results: Vec<TesterResult>, comparator: F) -> Vec<TesterResult>
where
    F: FnMut(&TesterResult, &TesterResult) -> Ordering,
{
    results.sort_by(comparator);
    results
}
