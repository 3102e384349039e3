//! Client-side use-case orchestration.
//!
//! # Responsibility
//! - Drive the gateway, the collection and the attachment resolver from
//!   user-level operations (refresh, create, edit, save, delete).
//! - Keep UI layers decoupled from remote and state-container details.

pub mod attachment;
pub mod notes_client;

pub use notes_client::{ClientError, NotesClient, RefreshOutcome, SaveOutcome};
