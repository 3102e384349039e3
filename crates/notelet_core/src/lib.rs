//! Core client logic for Notelet.
//! This crate is the single source of truth for the note list the UI
//! renders and for how it reconciles with the remote backend.

pub mod gateway;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use gateway::{
    GatewayError, GatewayOp, GatewayResult, InMemoryGateway, NoteGateway, ObjectStore,
    RetryingGateway,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{NoteDraft, NoteId, NotePatch, NoteRecord, NoteValidationError};
pub use model::view::{EditState, NoteView, Presence};
pub use service::{ClientError, NotesClient, RefreshOutcome, SaveOutcome};
pub use store::{NoteCollection, SingleFlight};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
