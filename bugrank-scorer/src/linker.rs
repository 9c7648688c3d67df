//! Tester linking: device ids to the testers who use them.

use std::collections::HashSet;

use bugrank_core::{RecordSource, Selector, SourceError};

/// Return each tester linked to a device in `device_ids`, once.
///
/// Device ids are opaque and matched verbatim. Testers keep the position of
/// their first qualifying link in the dataset. [`Selector::All`] returns every
/// linked tester.
///
/// # Errors
/// Returns [`SourceError`] when the link dataset cannot be opened, has no
/// header, or contains a malformed row.
pub fn link_testers<S>(source: &S, device_ids: &Selector) -> Result<Vec<String>, SourceError>
where
    S: RecordSource + ?Sized,
{
    let mut seen = HashSet::new();
    let mut testers = Vec::new();
    for row in source.tester_device_links()? {
        let link = row?;
        if device_ids.admits(&link.device_id) && seen.insert(link.tester_id.clone()) {
            testers.push(link.tester_id);
        }
    }
    Ok(testers)
}
