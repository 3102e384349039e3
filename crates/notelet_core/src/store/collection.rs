//! Keyed note collection with targeted mutations.
//!
//! # Responsibility
//! - Store one `NoteView` per id and apply single-record mutations.
//! - Produce the rendered list: visible entries in ascending id order.
//!
//! # Invariants
//! - A patch touches exactly one record and only the fields it names.
//! - `PendingDelete` entries stay stored but never render; they either get
//!   removed on backend confirmation or restored on failure.

use crate::model::note::{NoteId, NotePatch, NoteRecord};
use crate::model::view::NoteView;
use std::collections::BTreeMap;

/// The client's single source of truth for note state.
///
/// Keyed storage; ordering lives in the key, so every read that iterates
/// already sees ascending ids without a sort step.
#[derive(Debug, Default)]
pub struct NoteCollection {
    entries: BTreeMap<NoteId, NoteView>,
}

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the whole collection with freshly reconciled views.
    pub fn replace_all(&mut self, views: Vec<NoteView>) {
        self.entries = views
            .into_iter()
            .map(|view| (view.record.id.clone(), view))
            .collect();
    }

    /// Inserts one view, replacing any entry under the same id.
    pub fn insert(&mut self, view: NoteView) {
        self.entries.insert(view.record.id.clone(), view);
    }

    /// Adds a fetched record in the initial view state.
    pub fn add(&mut self, record: NoteRecord) {
        self.insert(NoteView::from_record(record));
    }

    pub fn get(&self, id: &NoteId) -> Option<&NoteView> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &NoteId) -> Option<&mut NoteView> {
        self.entries.get_mut(id)
    }

    /// Applies a targeted field patch to one record. Returns whether the id
    /// was present.
    pub fn patch(&mut self, id: &NoteId, patch: &NotePatch) -> bool {
        match self.entries.get_mut(id) {
            Some(view) => {
                if let Some(name) = &patch.name {
                    view.record.name = name.clone();
                }
                if let Some(description) = &patch.description {
                    view.record.description = description.clone();
                }
                true
            }
            None => false,
        }
    }

    /// Starts an optimistic delete: the entry stays stored but leaves the
    /// rendered list immediately. Returns whether the id was present.
    pub fn mark_pending_delete(&mut self, id: &NoteId) -> bool {
        match self.entries.get_mut(id) {
            Some(view) => {
                view.mark_pending_delete();
                true
            }
            None => false,
        }
    }

    /// Rolls a pending delete back to `Present`. Returns whether the id was
    /// present.
    pub fn restore(&mut self, id: &NoteId) -> bool {
        match self.entries.get_mut(id) {
            Some(view) => {
                view.restore();
                true
            }
            None => false,
        }
    }

    /// Removes one entry for good.
    pub fn remove(&mut self, id: &NoteId) -> Option<NoteView> {
        self.entries.remove(id)
    }

    /// Rendered list: visible entries in ascending id order.
    pub fn visible(&self) -> impl Iterator<Item = &NoteView> {
        self.entries.values().filter(|view| view.is_visible())
    }
}
