//! Persisted note shapes and field validation.
//!
//! # Responsibility
//! - Define the exact records crossing the gateway boundary.
//! - Validate user-editable fields before any remote call.
//!
//! # Invariants
//! - `NoteId` is opaque, immutable and totally ordered; the rendered list
//!   order is derived from it.
//! - The image key is serialized as `image` to match the backend schema and
//!   is omitted from wire documents when absent.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable server-assigned identifier for one note.
///
/// Kept opaque on purpose: the client never parses or derives meaning from
/// it, only compares and orders it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Wraps a backend-provided identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical persisted note, exactly what the backend stores and returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Stable id, assigned by the backend at creation time.
    pub id: NoteId,
    /// Short non-empty title, user-editable.
    pub name: String,
    /// Non-empty body text, user-editable.
    pub description: String,
    /// Opaque object-storage key. Set once from an uploaded file's
    /// normalized name, never edited directly by the user.
    #[serde(rename = "image", skip_serializing_if = "Option::is_none", default)]
    pub image_key: Option<String>,
}

impl NoteRecord {
    /// Validates the user-editable fields.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        validate_note_fields(&self.name, &self.description)
    }
}

/// Create input: everything but the id, which the backend assigns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub name: String,
    pub description: String,
    /// Pending storage key, recorded as soon as a file is selected; the
    /// upload may precede the note that will reference it.
    #[serde(rename = "image", skip_serializing_if = "Option::is_none", default)]
    pub image_key: Option<String>,
}

impl NoteDraft {
    /// Validates the user-editable fields.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        validate_note_fields(&self.name, &self.description)
    }

    /// Resets the draft to its initial empty state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Targeted field patch applied to one stored note by id.
///
/// Unset fields are left untouched; this is the only mutation shape the
/// collection accepts, so a keystroke edit can never rebuild the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl NotePatch {
    /// Returns whether the patch would change anything at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Validation failure for user-provided note input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// `name` is empty or whitespace-only.
    EmptyName,
    /// `description` is empty or whitespace-only.
    EmptyDescription,
    /// A selected file name cannot be turned into a usable storage key.
    InvalidImageKey(String),
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "note name must not be empty"),
            Self::EmptyDescription => write!(f, "note description must not be empty"),
            Self::InvalidImageKey(value) => {
                write!(f, "file name `{value}` does not yield a usable storage key")
            }
        }
    }
}

impl Error for NoteValidationError {}

/// Validates the two required user-editable fields.
pub fn validate_note_fields(name: &str, description: &str) -> Result<(), NoteValidationError> {
    if name.trim().is_empty() {
        return Err(NoteValidationError::EmptyName);
    }
    if description.trim().is_empty() {
        return Err(NoteValidationError::EmptyDescription);
    }
    Ok(())
}
