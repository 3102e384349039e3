//! In-memory note state: the collection and its refresh serialization.
//!
//! # Responsibility
//! - Own the single source of truth for the rendered list.
//! - Keep state transitions explicit; no collection snapshot ever escapes
//!   into a closure to be written back later.
//!
//! # Invariants
//! - One entry per `NoteId`; the render order is ascending id, recomputed
//!   on every read.
//! - Only one refresh reconciliation can be in flight at a time.

pub mod collection;
pub mod single_flight;

pub use collection::NoteCollection;
pub use single_flight::SingleFlight;
