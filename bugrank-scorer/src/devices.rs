//! Device resolution: descriptions to device ids.

use bugrank_core::{RecordSource, Selector, SourceError};

/// Return the id of every device whose description passes `descriptions`.
///
/// Descriptions are lower-cased before matching, so the selector should hold
/// lower-cased values (see [`Selector::case_folded`]). Ids are returned in
/// source order and are not deduplicated. [`Selector::All`] returns every id.
///
/// # Errors
/// Returns [`SourceError`] when the devices dataset cannot be opened, has no
/// header, or contains a malformed row.
pub fn resolve_device_ids<S>(source: &S, descriptions: &Selector) -> Result<Vec<String>, SourceError>
where
    S: RecordSource + ?Sized,
{
    let mut ids = Vec::new();
    for row in source.devices()? {
        let device = row?;
        if descriptions.admits_folded(&device.description) {
            ids.push(device.id);
        }
    }
    Ok(ids)
}
