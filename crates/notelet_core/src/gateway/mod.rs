//! Remote boundary: notes API and object-storage contracts.
//!
//! # Responsibility
//! - Define use-case oriented contracts for the managed backend.
//! - Keep transport details out of store/service orchestration.
//!
//! # Invariants
//! - Gateway calls are pure pass-through: no caching, no implicit retries,
//!   no local fallbacks. Failures come back typed, never as panics.
//! - Every `list_notes` call is a full re-fetch.

pub mod memory;
pub mod note_gateway;
pub mod object_store;
pub mod retry;

pub use memory::{GatewayOp, InMemoryGateway};
pub use note_gateway::{GatewayError, GatewayResult, NoteGateway};
pub use object_store::ObjectStore;
pub use retry::RetryingGateway;
