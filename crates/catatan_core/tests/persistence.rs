use catatan_core::{
    MemoryStorage, NoteDraft, NoteStore, SqliteStorage, StorageAdapter, StoreOptions, Theme,
    STORAGE_KEY,
};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn short_debounce() -> StoreOptions {
    StoreOptions {
        debounce: Duration::from_millis(40),
        ..StoreOptions::default()
    }
}

#[test]
fn burst_of_mutations_coalesces_into_one_write() {
    let storage = Arc::new(MemoryStorage::new());
    let mut store = NoteStore::open(storage.clone(), short_debounce());

    for _ in 0..5 {
        store.create_note(NoteDraft::default());
    }
    // Writes are debounced; nothing should have landed yet.
    assert_eq!(storage.save_count(), 0);

    thread::sleep(Duration::from_millis(150));
    assert_eq!(storage.save_count(), 1);

    let blob = storage.stored(STORAGE_KEY).expect("state blob written");
    let state: serde_json::Value = serde_json::from_str(&blob).expect("blob is valid JSON");
    assert_eq!(state["notes"].as_array().map(Vec::len), Some(5));
}

#[test]
fn each_mutation_resets_the_quiet_timer() {
    let storage = Arc::new(MemoryStorage::new());
    let mut store = NoteStore::open(storage.clone(), short_debounce());

    // Keep mutating faster than the quiet interval; the timer keeps
    // resetting, so no intermediate write may land.
    for _ in 0..4 {
        store.create_note(NoteDraft::default());
        thread::sleep(Duration::from_millis(15));
    }
    assert_eq!(storage.save_count(), 0);

    thread::sleep(Duration::from_millis(150));
    assert_eq!(storage.save_count(), 1);
}

#[test]
fn flush_forces_the_pending_write() {
    let storage = Arc::new(MemoryStorage::new());
    let mut store = NoteStore::open(storage.clone(), StoreOptions::default());

    store.create_note(NoteDraft::default());
    store.flush();

    assert_eq!(storage.save_count(), 1);
    assert!(storage.stored(STORAGE_KEY).is_some());
}

#[test]
fn dropping_the_store_drains_pending_state() {
    let storage = Arc::new(MemoryStorage::new());
    {
        let mut store = NoteStore::open(storage.clone(), StoreOptions::default());
        store.create_note(NoteDraft::default());
    }
    assert_eq!(storage.save_count(), 1);
}

#[test]
fn persisted_state_survives_reopen() {
    let storage = Arc::new(MemoryStorage::new());
    let note = {
        let mut store = NoteStore::open(storage.clone(), StoreOptions::default());
        let note = store.create_note(NoteDraft {
            title: Some("Persisten".to_string()),
            ..NoteDraft::default()
        });
        store.toggle_theme();
        store.flush();
        note
    };

    let reopened = NoteStore::open(storage, StoreOptions::default());
    assert_eq!(reopened.notes().len(), 1);
    assert_eq!(reopened.notes()[0].id, note.id);
    assert_eq!(reopened.theme(), Theme::Dark);
}

#[test]
fn malformed_persisted_blob_recovers_to_empty_state() {
    let storage = Arc::new(MemoryStorage::with_entry(STORAGE_KEY, "{rusak"));
    let store = NoteStore::open(storage, StoreOptions::default());

    assert!(store.notes().is_empty());
    assert_eq!(store.theme(), Theme::Light);
}

#[test]
fn sqlite_adapter_round_trips_through_a_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("catatan.db");

    {
        let storage = Arc::new(SqliteStorage::open(&path).expect("storage opens"));
        let mut store = NoteStore::open(storage, StoreOptions::default());
        store.create_note(NoteDraft {
            title: Some("Di disk".to_string()),
            ..NoteDraft::default()
        });
        store.flush();
    }

    let storage = Arc::new(SqliteStorage::open(&path).expect("storage reopens"));
    assert!(storage
        .load(STORAGE_KEY)
        .expect("load succeeds")
        .is_some());

    let store = NoteStore::open(storage, StoreOptions::default());
    assert_eq!(store.notes().len(), 1);
    assert_eq!(store.notes()[0].title, "Di disk");
}
