//! Notes client: reconciliation, create form, edit mode, optimistic delete.
//!
//! # Responsibility
//! - Orchestrate gateway calls and collection mutations into the user-level
//!   operations the UI layer drives.
//! - Own the create draft and the per-note edit-mode state machine.
//!
//! # Invariants
//! - Every mutating operation reconciles through `refresh()` on success;
//!   the backend stays the source of truth.
//! - Overlapping refreshes coalesce instead of racing; a coalesced trigger
//!   never overwrites the flight that is already applying.
//! - Validation failures surface as typed errors before any remote call.

use crate::gateway::note_gateway::{GatewayError, NoteGateway};
use crate::gateway::object_store::ObjectStore;
use crate::model::note::{NoteDraft, NoteId, NotePatch, NoteRecord, NoteValidationError};
use crate::model::view::NoteView;
use crate::service::attachment;
use crate::store::collection::NoteCollection;
use crate::store::single_flight::SingleFlight;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Client-level error for note use-cases.
#[derive(Debug)]
pub enum ClientError {
    /// User input failed validation; nothing was sent to the backend.
    Validation(NoteValidationError),
    /// The note is unknown locally or vanished server-side.
    NoteNotFound(NoteId),
    /// The operation requires the note to be in edit mode.
    NotEditing(NoteId),
    /// Remote boundary failure.
    Gateway(GatewayError),
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::NotEditing(id) => write!(f, "note {id} is not in edit mode"),
            Self::Gateway(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Gateway(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GatewayError> for ClientError {
    fn from(value: GatewayError) -> Self {
        match value {
            GatewayError::NoteNotFound(id) => Self::NoteNotFound(id),
            other => Self::Gateway(other),
        }
    }
}

impl From<NoteValidationError> for ClientError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Result of one refresh trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The collection was reconciled from a fresh backend fetch.
    Applied {
        notes: usize,
        /// Notes whose image URL could not be resolved this round; their
        /// entries stay in the list without a display URL.
        image_failures: usize,
    },
    /// Another refresh was already in flight; this trigger folded into it.
    Coalesced,
}

/// Result of saving an edited note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The edit was persisted and the collection reconciled.
    Saved,
    /// The submitted name matched the server's current name; no update was
    /// issued, only a refresh.
    SkippedUnchanged,
}

/// Use-case facade over a notes gateway and an object store.
pub struct NotesClient<G: NoteGateway, S: ObjectStore> {
    gateway: G,
    objects: S,
    collection: NoteCollection,
    draft: NoteDraft,
    refresh_flight: SingleFlight,
}

impl<G: NoteGateway, S: ObjectStore> NotesClient<G, S> {
    /// Creates a client with an empty collection and an empty create draft.
    /// Call [`refresh`](Self::refresh) to load the initial list.
    pub fn new(gateway: G, objects: S) -> Self {
        Self {
            gateway,
            objects,
            collection: NoteCollection::new(),
            draft: NoteDraft::default(),
            refresh_flight: SingleFlight::new(),
        }
    }

    /// Reconciles the collection from a full backend fetch.
    ///
    /// Image URLs are re-resolved per note; a single failed resolution is
    /// counted and logged but never aborts the refresh. Every rebuilt view
    /// starts in `Viewing`. Overlapping triggers coalesce into the active
    /// flight.
    pub fn refresh(&mut self) -> Result<RefreshOutcome, ClientError> {
        let guard = match self.refresh_flight.begin() {
            Some(guard) => guard,
            None => {
                info!("event=notes_refresh module=service status=coalesced");
                return Ok(RefreshOutcome::Coalesced);
            }
        };
        let started_at = Instant::now();
        info!("event=notes_refresh module=service status=start");

        let records = match self.gateway.list_notes() {
            Ok(records) => records,
            Err(err) => {
                error!(
                    "event=notes_refresh module=service status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                return Err(err.into());
            }
        };

        let mut views = Vec::with_capacity(records.len());
        let mut image_failures = 0usize;
        for record in records {
            let mut view = NoteView::from_record(record);
            if let Err(err) = attachment::resolve_for_display(&mut view, &self.objects) {
                image_failures += 1;
                warn!(
                    "event=image_resolve module=service status=error note_id={} error={err}",
                    view.record.id
                );
            }
            views.push(view);
        }

        let notes = views.len();
        self.collection.replace_all(views);
        drop(guard);

        info!(
            "event=notes_refresh module=service status=ok duration_ms={} notes={notes} image_failures={image_failures}",
            started_at.elapsed().as_millis()
        );
        Ok(RefreshOutcome::Applied {
            notes,
            image_failures,
        })
    }

    // --- create form surface ---

    pub fn set_draft_name(&mut self, value: impl Into<String>) {
        self.draft.name = value.into();
    }

    pub fn set_draft_description(&mut self, value: impl Into<String>) {
        self.draft.description = value.into();
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    /// Uploads a selected file and records its key on the create draft.
    ///
    /// The upload happens as soon as the file is picked, before any note
    /// references the key; an abandoned draft leaves the object orphaned.
    /// Returns the normalized storage key.
    pub fn attach_draft_image(
        &mut self,
        file_name: &str,
        content: &[u8],
    ) -> Result<String, ClientError> {
        let key = attachment::normalize_object_key(file_name)?;
        self.objects.put_object(&key, content)?;
        info!(
            "event=object_put module=service status=ok key={key} bytes={}",
            content.len()
        );
        self.draft.image_key = Some(key.clone());
        self.refresh()?;
        Ok(key)
    }

    /// Submits the create draft: validates, creates, resets, reconciles.
    ///
    /// Empty `name` or `description` is a typed validation error; no
    /// gateway call is made and the draft keeps its fields for correction.
    pub fn submit_draft(&mut self) -> Result<NoteRecord, ClientError> {
        self.draft.validate()?;

        let created = self.gateway.create_note(&self.draft)?;
        info!(
            "event=note_create module=service status=ok note_id={}",
            created.id
        );
        self.draft.clear();
        self.refresh()?;
        Ok(created)
    }

    // --- edit-mode controller ---

    /// `Viewing -> Editing` for exactly this note; siblings keep their
    /// state. Idempotent when the note is already in edit mode.
    pub fn begin_edit(&mut self, id: &NoteId) -> Result<(), ClientError> {
        match self.collection.get_mut(id) {
            Some(view) => {
                view.begin_edit();
                Ok(())
            }
            None => Err(ClientError::NoteNotFound(id.clone())),
        }
    }

    /// Keystroke-level name update while editing: a targeted single-field
    /// patch on one record, nothing else moves.
    pub fn edit_name(&mut self, id: &NoteId, value: impl Into<String>) -> Result<(), ClientError> {
        let view = self
            .collection
            .get(id)
            .ok_or_else(|| ClientError::NoteNotFound(id.clone()))?;
        if !view.is_editing() {
            return Err(ClientError::NotEditing(id.clone()));
        }
        self.collection.patch(
            id,
            &NotePatch {
                name: Some(value.into()),
                description: None,
            },
        );
        Ok(())
    }

    /// Saves an edited note: `Editing -> Viewing` through reconciliation.
    ///
    /// Fetches the latest server copy first; when the submitted name equals
    /// the server's current name the update is skipped entirely and only a
    /// refresh runs. The comparison is on `name` alone — the one editable
    /// field of the in-place row.
    pub fn save_note(&mut self, id: &NoteId) -> Result<SaveOutcome, ClientError> {
        let view = self
            .collection
            .get(id)
            .ok_or_else(|| ClientError::NoteNotFound(id.clone()))?;
        if !view.is_editing() {
            return Err(ClientError::NotEditing(id.clone()));
        }
        view.record.validate()?;
        let edited = attachment::record_for_persistence(view);

        let server_notes = self.gateway.list_notes()?;
        let server_copy = server_notes
            .into_iter()
            .find(|record| record.id == *id)
            .ok_or_else(|| ClientError::NoteNotFound(id.clone()))?;

        if server_copy.name == edited.name {
            self.refresh()?;
            return Ok(SaveOutcome::SkippedUnchanged);
        }

        self.gateway.update_note(&edited)?;
        info!("event=note_update module=service status=ok note_id={id}");
        self.refresh()?;
        Ok(SaveOutcome::Saved)
    }

    // --- delete ---

    /// Optimistic delete: the note leaves the rendered list immediately,
    /// then the backend call confirms (`remove`) or rolls back (`restore`).
    pub fn delete_note(&mut self, id: &NoteId) -> Result<(), ClientError> {
        if !self.collection.mark_pending_delete(id) {
            return Err(ClientError::NoteNotFound(id.clone()));
        }

        match self.gateway.delete_note(id) {
            Ok(()) => {
                self.collection.remove(id);
                info!("event=note_delete module=service status=ok note_id={id}");
                Ok(())
            }
            Err(err) => {
                self.collection.restore(id);
                error!("event=note_delete module=service status=error note_id={id} error={err}");
                Err(err.into())
            }
        }
    }

    // --- reads ---

    /// Rendered list: visible notes in ascending id order.
    pub fn notes(&self) -> Vec<&NoteView> {
        self.collection.visible().collect()
    }

    pub fn note(&self, id: &NoteId) -> Option<&NoteView> {
        self.collection.get(id)
    }

    pub fn note_count(&self) -> usize {
        self.collection.visible().count()
    }
}
