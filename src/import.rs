//! Uploaded roster document decoding.
//!
//! Decoding is pure: it validates shape and returns drafts for the caller to
//! hand to [`crate::core::store::GuestStore::replace_all`]. A failed decode
//! therefore never leaves the store partially updated.

use serde_json::Value;
use thiserror::Error;

use crate::guest::GuestDraft;

/// Reasons an uploaded roster document is unusable.
///
/// All variants abort the import and surface to the operator; the current
/// roster is left untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document is not well-formed JSON.
    #[error("could not parse guest file: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document parsed but has no top-level `guests` array.
    #[error("guest file has no top-level `guests` list")]
    MissingGuests,
    /// An entry in `guests` is not an object.
    #[error("guest entry {index} is not an object")]
    BadEntry {
        /// Zero-based position of the offending entry.
        index: usize,
    },
}

/// Decodes an uploaded roster document into guest drafts.
///
/// Requires a top-level `guests` array of objects. Each entry should provide
/// at least a `name`; a missing `id` is tolerated (the store assigns one) and
/// unrecognized fields are carried through on the draft.
pub fn decode(raw: &str) -> Result<Vec<GuestDraft>, ImportError> {
    let doc: Value = serde_json::from_str(raw)?;
    let guests = doc
        .get("guests")
        .and_then(Value::as_array)
        .ok_or(ImportError::MissingGuests)?;

    let mut drafts = Vec::with_capacity(guests.len());
    for (index, entry) in guests.iter().enumerate() {
        if !entry.is_object() {
            return Err(ImportError::BadEntry { index });
        }
        drafts.push(serde_json::from_value::<GuestDraft>(entry.clone())?);
    }
    Ok(drafts)
}
