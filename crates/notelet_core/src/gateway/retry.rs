//! Single-retry policy decorator for gateway calls.
//!
//! # Responsibility
//! - Absorb exactly one transient failure per call (retryable transport
//!   errors and timeouts), then give up.
//!
//! # Invariants
//! - Non-transient failures propagate unchanged on the first attempt.
//! - At most two attempts per call; user-driven operations are low
//!   frequency and the backend owns durability, so nothing more is needed.

use crate::gateway::note_gateway::{GatewayResult, NoteGateway};
use crate::gateway::object_store::ObjectStore;
use crate::model::note::{NoteDraft, NoteId, NoteRecord};
use log::warn;

/// Wraps any backend and retries each call once on a transient failure.
#[derive(Debug, Clone)]
pub struct RetryingGateway<B> {
    inner: B,
}

impl<B> RetryingGateway<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }
}

impl<B: NoteGateway> NoteGateway for RetryingGateway<B> {
    fn list_notes(&self) -> GatewayResult<Vec<NoteRecord>> {
        retry_once("list_notes", || self.inner.list_notes())
    }

    fn create_note(&self, draft: &NoteDraft) -> GatewayResult<NoteRecord> {
        retry_once("create_note", || self.inner.create_note(draft))
    }

    fn update_note(&self, record: &NoteRecord) -> GatewayResult<NoteRecord> {
        retry_once("update_note", || self.inner.update_note(record))
    }

    fn delete_note(&self, id: &NoteId) -> GatewayResult<()> {
        retry_once("delete_note", || self.inner.delete_note(id))
    }
}

impl<B: ObjectStore> ObjectStore for RetryingGateway<B> {
    fn put_object(&self, key: &str, content: &[u8]) -> GatewayResult<()> {
        retry_once("put_object", || self.inner.put_object(key, content))
    }

    fn object_url(&self, key: &str) -> GatewayResult<String> {
        retry_once("object_url", || self.inner.object_url(key))
    }
}

fn retry_once<T>(op: &str, mut call: impl FnMut() -> GatewayResult<T>) -> GatewayResult<T> {
    match call() {
        Err(err) if err.is_transient() => {
            warn!("event=gateway_retry module=gateway op={op} reason={err}");
            call()
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::RetryingGateway;
    use crate::gateway::memory::{GatewayOp, InMemoryGateway};
    use crate::gateway::note_gateway::{GatewayError, NoteGateway};

    #[test]
    fn transient_failure_is_absorbed_by_one_retry() {
        let backend = InMemoryGateway::new();
        backend.fail_next(GatewayOp::ListNotes, true);

        let retrying = RetryingGateway::new(backend.clone());
        assert!(retrying.list_notes().is_ok());
        assert_eq!(backend.calls(GatewayOp::ListNotes), 2);
    }

    #[test]
    fn permanent_failure_propagates_without_second_attempt() {
        let backend = InMemoryGateway::new();
        backend.fail_next(GatewayOp::ListNotes, false);

        let retrying = RetryingGateway::new(backend.clone());
        assert!(matches!(
            retrying.list_notes().unwrap_err(),
            GatewayError::Transport { retryable: false, .. }
        ));
        assert_eq!(backend.calls(GatewayOp::ListNotes), 1);
    }

    #[test]
    fn retry_surfaces_the_second_attempts_outcome() {
        let backend = InMemoryGateway::new();
        backend.fail_next(GatewayOp::DeleteNote, true);
        let retrying = RetryingGateway::new(backend.clone());

        // Attempt one consumes the injected transient failure; attempt two
        // reaches the real backend, which has no such note.
        let err = retrying
            .delete_note(&crate::model::note::NoteId::new("ghost"))
            .unwrap_err();
        assert!(matches!(err, GatewayError::NoteNotFound(_)));
        assert_eq!(backend.calls(GatewayOp::DeleteNote), 2);
    }
}
