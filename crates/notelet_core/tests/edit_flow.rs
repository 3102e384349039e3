use notelet_core::{
    ClientError, GatewayOp, InMemoryGateway, NoteGateway, NoteId, NoteRecord, NotesClient,
    NoteValidationError, SaveOutcome,
};

fn seeded_client(
    ids: &[(&str, &str)],
) -> (InMemoryGateway, NotesClient<InMemoryGateway, InMemoryGateway>) {
    let backend = InMemoryGateway::new();
    for (id, name) in ids {
        backend
            .seed_note(&NoteRecord {
                id: NoteId::new(*id),
                name: name.to_string(),
                description: format!("d{id}"),
                image_key: None,
            })
            .unwrap();
    }
    let mut client = NotesClient::new(backend.clone(), backend.clone());
    client.refresh().unwrap();
    (backend, client)
}

#[test]
fn begin_edit_marks_only_the_target_note() {
    let (_backend, mut client) = seeded_client(&[("1", "A"), ("2", "B")]);

    client.begin_edit(&NoteId::new("1")).unwrap();

    assert!(client.note(&NoteId::new("1")).unwrap().is_editing());
    assert!(!client.note(&NoteId::new("2")).unwrap().is_editing());

    // Idempotent re-entry.
    client.begin_edit(&NoteId::new("1")).unwrap();
    assert!(client.note(&NoteId::new("1")).unwrap().is_editing());
}

#[test]
fn keystroke_edits_patch_one_field_of_one_record() {
    let (_backend, mut client) = seeded_client(&[("1", "A"), ("2", "B")]);
    let id = NoteId::new("1");

    client.begin_edit(&id).unwrap();
    client.edit_name(&id, "Al").unwrap();
    client.edit_name(&id, "Alpha").unwrap();

    let edited = client.note(&id).unwrap();
    assert_eq!(edited.record.name, "Alpha");
    assert_eq!(edited.record.description, "d1");

    let sibling = client.note(&NoteId::new("2")).unwrap();
    assert_eq!(sibling.record.name, "B");
}

#[test]
fn keystroke_edits_require_edit_mode() {
    let (_backend, mut client) = seeded_client(&[("1", "A")]);
    let err = client.edit_name(&NoteId::new("1"), "nope").unwrap_err();
    assert!(matches!(err, ClientError::NotEditing(_)));
    assert_eq!(client.note(&NoteId::new("1")).unwrap().record.name, "A");
}

#[test]
fn save_with_unchanged_name_skips_the_update_call() {
    let (backend, mut client) = seeded_client(&[("1", "A")]);
    let id = NoteId::new("1");

    client.begin_edit(&id).unwrap();
    let outcome = client.save_note(&id).unwrap();

    assert_eq!(outcome, SaveOutcome::SkippedUnchanged);
    assert_eq!(backend.calls(GatewayOp::UpdateNote), 0);
    // Pre-save server fetch + reconciling refresh, on top of the seeding
    // refresh in the fixture.
    assert_eq!(backend.calls(GatewayOp::ListNotes), 3);
    // The refresh rebuilt the view back into viewing mode.
    assert!(!client.note(&id).unwrap().is_editing());
}

#[test]
fn save_persists_a_renamed_note_and_leaves_edit_mode() {
    let (backend, mut client) = seeded_client(&[("1", "A")]);
    let id = NoteId::new("1");

    client.begin_edit(&id).unwrap();
    client.edit_name(&id, "Renamed").unwrap();
    let outcome = client.save_note(&id).unwrap();

    assert_eq!(outcome, SaveOutcome::Saved);
    assert_eq!(backend.calls(GatewayOp::UpdateNote), 1);

    let stored = backend.list_notes().unwrap();
    assert_eq!(stored[0].name, "Renamed");
    assert_eq!(stored[0].description, "d1");

    let view = client.note(&id).unwrap();
    assert!(!view.is_editing());
    assert_eq!(view.record.name, "Renamed");
}

#[test]
fn save_with_blank_name_surfaces_validation_and_stays_editing() {
    let (backend, mut client) = seeded_client(&[("1", "A")]);
    let id = NoteId::new("1");

    client.begin_edit(&id).unwrap();
    client.edit_name(&id, "   ").unwrap();
    let err = client.save_note(&id).unwrap_err();

    assert!(matches!(
        err,
        ClientError::Validation(NoteValidationError::EmptyName)
    ));
    assert_eq!(backend.calls(GatewayOp::UpdateNote), 0);
    assert!(client.note(&id).unwrap().is_editing());
}

#[test]
fn save_requires_edit_mode() {
    let (_backend, mut client) = seeded_client(&[("1", "A")]);
    let err = client.save_note(&NoteId::new("1")).unwrap_err();
    assert!(matches!(err, ClientError::NotEditing(_)));
}

#[test]
fn save_of_a_note_that_vanished_server_side_is_not_found() {
    let (backend, mut client) = seeded_client(&[("1", "A")]);
    let id = NoteId::new("1");

    client.begin_edit(&id).unwrap();
    client.edit_name(&id, "Renamed").unwrap();
    // Someone else deleted the note between our refresh and the save.
    backend.delete_note(&id).unwrap();

    let err = client.save_note(&id).unwrap_err();
    assert!(matches!(err, ClientError::NoteNotFound(_)));
    assert_eq!(backend.calls(GatewayOp::UpdateNote), 0);
}

#[test]
fn failed_update_leaves_sibling_state_untouched() {
    let (backend, mut client) = seeded_client(&[("1", "A"), ("2", "B")]);
    let target = NoteId::new("1");
    let sibling = NoteId::new("2");

    client.begin_edit(&sibling).unwrap();
    client.begin_edit(&target).unwrap();
    client.edit_name(&target, "Renamed").unwrap();

    backend.fail_next(GatewayOp::UpdateNote, false);
    let err = client.save_note(&target).unwrap_err();
    assert!(matches!(err, ClientError::Gateway(_)));

    // No reconciliation ran; the save touched nothing beyond the target.
    assert!(client.note(&sibling).unwrap().is_editing());
    assert_eq!(client.note(&sibling).unwrap().record.name, "B");
    assert!(client.note(&target).unwrap().is_editing());
}
