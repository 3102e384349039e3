//! Image attachment resolution and persistence shaping.
//!
//! # Responsibility
//! - Map a stored image key to a displayable URL for the view model.
//! - Produce the persisted shape of a note and normalize upload keys.
//!
//! # Invariants
//! - Resolution never touches the canonical `image_key`; resolve-then-strip
//!   always yields the original persisted fields.
//! - Storage keys contain only `[A-Za-z0-9._-]` and are never empty.

use crate::gateway::note_gateway::GatewayResult;
use crate::gateway::object_store::ObjectStore;
use crate::model::note::{NoteRecord, NoteValidationError};
use crate::model::view::NoteView;
use once_cell::sync::Lazy;
use regex::Regex;

static OBJECT_KEY_INVALID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid object key regex"));

/// Resolves the view's display URL from its stored image key, when one is
/// set. The canonical key stays untouched either way.
pub fn resolve_for_display<S: ObjectStore>(view: &mut NoteView, objects: &S) -> GatewayResult<()> {
    if let Some(key) = view.record.image_key.as_deref() {
        view.resolved_image_url = Some(objects.object_url(key)?);
    }
    Ok(())
}

/// Returns the persisted shape of one view: the canonical record with the
/// stored image key and none of the transient state. The strip is
/// structural — `NoteRecord` has nowhere to carry view fields.
pub fn record_for_persistence(view: &NoteView) -> NoteRecord {
    view.record.clone()
}

/// Derives a storage key from a selected file's name: the final path
/// component with every disallowed character run collapsed to `_`.
pub fn normalize_object_key(file_name: &str) -> Result<String, NoteValidationError> {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();
    let sanitized = OBJECT_KEY_INVALID_RE.replace_all(base, "_");
    let key = sanitized.trim_matches(|c| c == '_' || c == '.');
    if key.is_empty() {
        return Err(NoteValidationError::InvalidImageKey(file_name.to_string()));
    }
    Ok(key.to_string())
}
