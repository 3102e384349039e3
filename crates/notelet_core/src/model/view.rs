//! Transient view model kept client-side only.
//!
//! # Responsibility
//! - Carry per-note view state (edit mode, delete progress, resolved image
//!   URL) alongside the persisted record.
//!
//! # Invariants
//! - Nothing in this module is ever serialized toward the backend.
//! - A freshly reconciled view always starts `Viewing` and `Present`.

use crate::model::note::NoteRecord;

/// Per-note edit-mode state machine.
///
/// Terminal and initial state is `Viewing`; `Editing` is entered by an
/// explicit user action and left on a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Viewing,
    Editing,
}

/// Optimistic-delete progress for one note.
///
/// `PendingDelete` hides the note from the rendered list while the backend
/// call is outstanding; a failed call moves it back to `Present`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    PendingDelete,
}

/// One note as the client holds it: persisted record plus transient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    /// Canonical persisted shape; the only part that ever crosses the
    /// gateway.
    pub record: NoteRecord,
    /// Displayable URL resolved from `record.image_key`, when resolution
    /// succeeded. Recomputed on every refresh, never persisted.
    pub resolved_image_url: Option<String>,
    pub edit: EditState,
    pub presence: Presence,
}

impl NoteView {
    /// Wraps a fetched record in the initial view state.
    pub fn from_record(record: NoteRecord) -> Self {
        Self {
            record,
            resolved_image_url: None,
            edit: EditState::Viewing,
            presence: Presence::Present,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit == EditState::Editing
    }

    /// Returns whether the note belongs in the rendered list.
    pub fn is_visible(&self) -> bool {
        self.presence == Presence::Present
    }

    pub fn begin_edit(&mut self) {
        self.edit = EditState::Editing;
    }

    pub fn end_edit(&mut self) {
        self.edit = EditState::Viewing;
    }

    pub fn mark_pending_delete(&mut self) {
        self.presence = Presence::PendingDelete;
    }

    /// Reverts a pending delete after a failed backend call.
    pub fn restore(&mut self) {
        self.presence = Presence::Present;
    }
}

#[cfg(test)]
mod tests {
    use super::{EditState, NoteView, Presence};
    use crate::model::note::{NoteId, NoteRecord};

    fn view(id: &str) -> NoteView {
        NoteView::from_record(NoteRecord {
            id: NoteId::new(id),
            name: "n".to_string(),
            description: "d".to_string(),
            image_key: None,
        })
    }

    #[test]
    fn fresh_view_starts_viewing_and_present() {
        let fresh = view("1");
        assert_eq!(fresh.edit, EditState::Viewing);
        assert_eq!(fresh.presence, Presence::Present);
        assert!(fresh.is_visible());
        assert!(!fresh.is_editing());
    }

    #[test]
    fn pending_delete_hides_and_restore_reveals() {
        let mut target = view("1");
        target.mark_pending_delete();
        assert!(!target.is_visible());
        target.restore();
        assert!(target.is_visible());
    }
}
