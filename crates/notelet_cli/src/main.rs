//! CLI smoke probe.
//!
//! # Responsibility
//! - Drive one full client session against the in-memory backend to verify
//!   `notelet_core` wiring without any UI runtime.
//! - Keep output deterministic for quick local sanity checks.

use notelet_core::{InMemoryGateway, NotesClient, SaveOutcome};

fn main() {
    println!("notelet_core version={}", notelet_core::core_version());

    let backend = InMemoryGateway::new();
    let mut client = NotesClient::new(backend.clone(), backend);

    client.set_draft_name("Shop");
    client.set_draft_description("milk, eggs");
    let created = match client.submit_draft() {
        Ok(record) => record,
        Err(err) => {
            eprintln!("create failed: {err}");
            std::process::exit(1);
        }
    };
    println!("created name={} description={}", created.name, created.description);

    let id = created.id.clone();
    if let Err(err) = client.begin_edit(&id) {
        eprintln!("edit failed: {err}");
        std::process::exit(1);
    }
    if let Err(err) = client.edit_name(&id, "Shopping") {
        eprintln!("edit failed: {err}");
        std::process::exit(1);
    }
    match client.save_note(&id) {
        Ok(SaveOutcome::Saved) => println!("saved renamed note"),
        Ok(SaveOutcome::SkippedUnchanged) => println!("save skipped: name unchanged"),
        Err(err) => {
            eprintln!("save failed: {err}");
            std::process::exit(1);
        }
    }

    println!("notes listed={}", client.note_count());

    if let Err(err) = client.delete_note(&id) {
        eprintln!("delete failed: {err}");
        std::process::exit(1);
    }
    println!("notes after delete={}", client.note_count());
}
