//! Notes API contract and gateway error taxonomy.
//!
//! # Responsibility
//! - Define the four remote note operations as a trait seam.
//! - Type every remote failure so callers can decide about rollbacks.
//!
//! # Invariants
//! - Implementations must not retry internally; retry policy is a separate
//!   decorator so callers can see every failure exactly once.

use crate::model::note::{NoteDraft, NoteId, NoteRecord};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure returned by any remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Network or backend rejection. `retryable` marks transient failures
    /// that a retry policy may absorb.
    Transport { message: String, retryable: bool },
    /// A deadline-capable transport gave up waiting. Treated as transient.
    Timeout { elapsed_ms: u64 },
    /// The backend has no note under this id.
    NoteNotFound(NoteId),
    /// The object store has no content under this key.
    ObjectMissing(String),
    /// The backend returned a document the client cannot decode.
    InvalidData(String),
}

impl GatewayError {
    /// Builds a transport failure.
    pub fn transport(message: impl Into<String>, retryable: bool) -> Self {
        Self::Transport {
            message: message.into(),
            retryable,
        }
    }

    /// Returns whether a single retry is allowed to absorb this failure.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                retryable: true,
                ..
            } | Self::Timeout { .. }
        )
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport { message, retryable } => {
                let kind = if *retryable { "transient" } else { "permanent" };
                write!(f, "{kind} transport failure: {message}")
            }
            Self::Timeout { elapsed_ms } => {
                write!(f, "gateway call timed out after {elapsed_ms}ms")
            }
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::ObjectMissing(key) => write!(f, "stored object not found: `{key}`"),
            Self::InvalidData(message) => write!(f, "invalid backend document: {message}"),
        }
    }
}

impl Error for GatewayError {}

/// Remote notes API: four operations, one outstanding request each, no
/// batching and no pagination (the backend returns the whole collection).
pub trait NoteGateway {
    /// Full re-fetch of every stored note.
    fn list_notes(&self) -> GatewayResult<Vec<NoteRecord>>;
    /// Creates one note; the backend assigns and returns the id.
    fn create_note(&self, draft: &NoteDraft) -> GatewayResult<NoteRecord>;
    /// Replaces the persisted fields of one existing note.
    fn update_note(&self, record: &NoteRecord) -> GatewayResult<NoteRecord>;
    /// Deletes one note by id.
    fn delete_note(&self, id: &NoteId) -> GatewayResult<()>;
}
