//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `catatan_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use catatan_core::{MemoryStorage, NoteDraft, NoteStore};
use std::sync::Arc;

fn main() {
    println!("catatan_core version={}", catatan_core::core_version());

    let mut store = NoteStore::open_default(Arc::new(MemoryStorage::new()));
    let note = store.create_note(NoteDraft {
        title: Some("Catatan percobaan".to_string()),
        body: Some("Satu baris isi.".to_string()),
        tags: Some(vec!["smoke".to_string()]),
        ..NoteDraft::default()
    });
    store.set_search("percobaan");

    println!("catatan_core notes={}", store.notes().len());
    println!("catatan_core filtered={}", store.filtered().len());
    println!(
        "catatan_core export_bytes={}",
        store.export_bundle().len() > 0
    );
    println!("catatan_core slug={}", catatan_core::filename_slug(&note.title));
}
