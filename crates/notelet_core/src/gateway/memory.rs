//! In-memory backend implementing both gateway contracts.
//!
//! # Responsibility
//! - Stand in for the managed notes API and object store behind the same
//!   traits a remote transport would implement.
//! - Give tests and the CLI probe scripted failures and call accounting.
//!
//! # Invariants
//! - Notes are held as wire documents and decoded on every read, so a
//!   corrupt document surfaces as `InvalidData` instead of being masked.
//! - Injected failures are one-shot: they consume themselves on the next
//!   matching call.

use crate::gateway::note_gateway::{GatewayError, GatewayResult, NoteGateway};
use crate::gateway::object_store::ObjectStore;
use crate::model::note::{NoteDraft, NoteId, NoteRecord};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Distinct remote operations, used for call counters and failure
/// injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GatewayOp {
    ListNotes,
    CreateNote,
    UpdateNote,
    DeleteNote,
    PutObject,
    ObjectUrl,
}

#[derive(Debug, Clone)]
struct InjectedFailure {
    message: String,
    retryable: bool,
}

#[derive(Debug, Default)]
struct MemoryState {
    notes: BTreeMap<NoteId, Value>,
    objects: BTreeMap<String, Vec<u8>>,
    broken_objects: BTreeSet<String>,
    pending_failures: BTreeMap<GatewayOp, InjectedFailure>,
    calls: BTreeMap<GatewayOp, usize>,
}

/// Shared-state in-memory backend. Cloning yields another handle onto the
/// same stored notes and objects, so one instance can serve both as the
/// notes gateway and as the object store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a note document directly, bypassing id assignment. Intended
    /// for seeding scenarios with known ids.
    pub fn seed_note(&self, record: &NoteRecord) -> GatewayResult<()> {
        let doc = encode_document(record)?;
        self.lock_state()?.notes.insert(record.id.clone(), doc);
        Ok(())
    }

    /// Inserts a raw backend document, valid or not. Intended for
    /// exercising the `InvalidData` read path.
    pub fn seed_raw_document(&self, id: impl Into<String>, doc: Value) -> GatewayResult<()> {
        self.lock_state()?.notes.insert(NoteId::new(id), doc);
        Ok(())
    }

    /// Arranges for the next call of `op` to fail. `retryable` controls the
    /// transport envelope's transience flag.
    pub fn fail_next(&self, op: GatewayOp, retryable: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.pending_failures.insert(
                op,
                InjectedFailure {
                    message: format!("injected failure for {op:?}"),
                    retryable,
                },
            );
        }
    }

    /// Makes URL resolution fail for one specific key until repaired,
    /// leaving every other object resolvable.
    pub fn break_object(&self, key: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.broken_objects.insert(key.into());
        }
    }

    /// Returns how many times `op` has been called on this backend.
    pub fn calls(&self, op: GatewayOp) -> usize {
        self.state
            .lock()
            .map(|state| state.calls.get(&op).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Returns the stored blob for `key`, if any. Test/probe convenience.
    pub fn object_content(&self, key: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.objects.get(key).cloned())
    }

    fn lock_state(&self) -> GatewayResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| GatewayError::transport("backend state poisoned", false))
    }

    fn enter(&self, op: GatewayOp) -> GatewayResult<MutexGuard<'_, MemoryState>> {
        let mut state = self.lock_state()?;
        *state.calls.entry(op).or_insert(0) += 1;
        if let Some(failure) = state.pending_failures.remove(&op) {
            return Err(GatewayError::Transport {
                message: failure.message,
                retryable: failure.retryable,
            });
        }
        Ok(state)
    }
}

impl NoteGateway for InMemoryGateway {
    fn list_notes(&self) -> GatewayResult<Vec<NoteRecord>> {
        let state = self.enter(GatewayOp::ListNotes)?;
        state
            .notes
            .values()
            .map(|doc| decode_document(doc.clone()))
            .collect()
    }

    fn create_note(&self, draft: &NoteDraft) -> GatewayResult<NoteRecord> {
        let mut state = self.enter(GatewayOp::CreateNote)?;
        let id = NoteId::new(Uuid::new_v4().to_string());

        let mut doc = encode_document(draft)?;
        match doc.as_object_mut() {
            Some(object) => {
                object.insert("id".to_string(), Value::String(id.as_str().to_string()));
            }
            None => {
                return Err(GatewayError::InvalidData(
                    "create input did not encode as a document".to_string(),
                ));
            }
        }

        let record = decode_document(doc.clone())?;
        state.notes.insert(id, doc);
        Ok(record)
    }

    fn update_note(&self, record: &NoteRecord) -> GatewayResult<NoteRecord> {
        let mut state = self.enter(GatewayOp::UpdateNote)?;
        if !state.notes.contains_key(&record.id) {
            return Err(GatewayError::NoteNotFound(record.id.clone()));
        }

        let doc = encode_document(record)?;
        state.notes.insert(record.id.clone(), doc);
        Ok(record.clone())
    }

    fn delete_note(&self, id: &NoteId) -> GatewayResult<()> {
        let mut state = self.enter(GatewayOp::DeleteNote)?;
        match state.notes.remove(id) {
            Some(_) => Ok(()),
            None => Err(GatewayError::NoteNotFound(id.clone())),
        }
    }
}

impl ObjectStore for InMemoryGateway {
    fn put_object(&self, key: &str, content: &[u8]) -> GatewayResult<()> {
        let mut state = self.enter(GatewayOp::PutObject)?;
        state.objects.insert(key.to_string(), content.to_vec());
        Ok(())
    }

    fn object_url(&self, key: &str) -> GatewayResult<String> {
        let state = self.enter(GatewayOp::ObjectUrl)?;
        if state.broken_objects.contains(key) {
            return Err(GatewayError::transport(
                format!("object backend unavailable for `{key}`"),
                false,
            ));
        }
        if !state.objects.contains_key(key) {
            return Err(GatewayError::ObjectMissing(key.to_string()));
        }
        Ok(format!("memory://objects/{key}"))
    }
}

fn encode_document<T: serde::Serialize>(value: &T) -> GatewayResult<Value> {
    serde_json::to_value(value)
        .map_err(|err| GatewayError::InvalidData(format!("input does not encode: {err}")))
}

fn decode_document(doc: Value) -> GatewayResult<NoteRecord> {
    serde_json::from_value(doc)
        .map_err(|err| GatewayError::InvalidData(format!("stored note does not decode: {err}")))
}

#[cfg(test)]
mod tests {
    use super::{GatewayOp, InMemoryGateway};
    use crate::gateway::note_gateway::{GatewayError, NoteGateway};
    use crate::gateway::object_store::ObjectStore;
    use crate::model::note::{NoteDraft, NoteId, NoteRecord};
    use serde_json::json;

    fn draft(name: &str) -> NoteDraft {
        NoteDraft {
            name: name.to_string(),
            description: "body".to_string(),
            image_key: None,
        }
    }

    #[test]
    fn create_assigns_an_id_and_list_returns_the_note() {
        let backend = InMemoryGateway::new();
        let created = backend.create_note(&draft("first")).unwrap();
        assert!(!created.id.as_str().is_empty());

        let listed = backend.list_notes().unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[test]
    fn update_and_delete_reject_unknown_ids() {
        let backend = InMemoryGateway::new();
        let ghost = NoteRecord {
            id: NoteId::new("missing"),
            name: "n".to_string(),
            description: "d".to_string(),
            image_key: None,
        };
        assert!(matches!(
            backend.update_note(&ghost).unwrap_err(),
            GatewayError::NoteNotFound(_)
        ));
        assert!(matches!(
            backend.delete_note(&NoteId::new("missing")).unwrap_err(),
            GatewayError::NoteNotFound(_)
        ));
    }

    #[test]
    fn corrupt_document_surfaces_as_invalid_data() {
        let backend = InMemoryGateway::new();
        backend
            .seed_raw_document("bad", json!({ "id": "bad", "name": 42 }))
            .unwrap();
        assert!(matches!(
            backend.list_notes().unwrap_err(),
            GatewayError::InvalidData(_)
        ));
    }

    #[test]
    fn injected_failure_fires_once_then_clears() {
        let backend = InMemoryGateway::new();
        backend.fail_next(GatewayOp::ListNotes, true);

        let failed = backend.list_notes().unwrap_err();
        assert!(failed.is_transient());
        assert!(backend.list_notes().is_ok());
        assert_eq!(backend.calls(GatewayOp::ListNotes), 2);
    }

    #[test]
    fn object_urls_resolve_only_for_stored_objects() {
        let backend = InMemoryGateway::new();
        backend.put_object("cat.png", b"bytes").unwrap();
        assert_eq!(
            backend.object_url("cat.png").unwrap(),
            "memory://objects/cat.png"
        );
        assert!(matches!(
            backend.object_url("dog.png").unwrap_err(),
            GatewayError::ObjectMissing(_)
        ));

        backend.break_object("cat.png");
        assert!(matches!(
            backend.object_url("cat.png").unwrap_err(),
            GatewayError::Transport { .. }
        ));
    }
}
