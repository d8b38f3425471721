//! Note store: the single writer over the canonical collection.
//!
//! # Responsibility
//! - Own the in-memory note collection and UI-facing session state
//!   (search, course filter, tag filters, theme).
//! - Apply every mutation synchronously and schedule a debounced write
//!   through the injected storage adapter.
//! - Derive the filtered view from {collection, search, course, tags}.
//!
//! # Invariants
//! - Note ids are pairwise distinct; lookups are by identity, never by
//!   position.
//! - Every field edit refreshes `updated_at`.
//! - Default display order is most-recent-first: new notes are inserted at
//!   the front; only import re-sorts (by `updated_at` descending).
//! - Update/delete on an unknown id is a silent no-op.

use crate::bundle::{
    decode_bundle, decode_persist_state, encode_bundle, encode_persist_state, ImportResult,
};
use crate::model::{dedupe_tags, Note, NoteDraft, NotePatch, Theme};
use crate::storage::StorageAdapter;
use crate::time::now_timestamp;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;

mod persist;

use persist::PersistScheduler;

/// Storage key holding the serialized state blob.
pub const STORAGE_KEY: &str = "catatan.notes.v1";

/// Quiet interval before a burst of mutations is persisted.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// Construction knobs for [`NoteStore::open`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub storage_key: String,
    pub debounce: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Counts reported after a successful [`NoteStore::import_bundle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    /// Notes now in the collection.
    pub imported: usize,
    /// Entries dropped by per-note validation.
    pub dropped: usize,
}

/// Explicitly owned, single-writer state container for notes.
///
/// Consumers obtain operations through this handle; the persistence
/// collaborator is injected so tests can substitute a double.
pub struct NoteStore {
    notes: Vec<Note>,
    search: String,
    course_filter: String,
    active_tag_filters: Vec<String>,
    theme: Theme,
    scheduler: PersistScheduler,
}

impl NoteStore {
    /// Opens a store over the given adapter with default options.
    pub fn open_default(storage: Arc<dyn StorageAdapter>) -> Self {
        Self::open(storage, StoreOptions::default())
    }

    /// Opens a store, loading persisted state once.
    ///
    /// Absent, unreadable, or malformed persisted state yields an empty
    /// collection and the default theme; startup never fails on bad data.
    pub fn open(storage: Arc<dyn StorageAdapter>, options: StoreOptions) -> Self {
        let raw = match storage.load(&options.storage_key) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("event=store_open module=store status=recovered error={err}");
                None
            }
        };
        let state = decode_persist_state(raw.as_deref());
        info!(
            "event=store_open module=store status=ok notes={} theme={:?}",
            state.notes.len(),
            state.meta.theme
        );

        Self {
            notes: state.notes,
            search: String::new(),
            course_filter: String::new(),
            active_tag_filters: Vec::new(),
            theme: state.meta.theme,
            scheduler: PersistScheduler::new(storage, options.storage_key, options.debounce),
        }
    }

    /// Creates a note from the draft and inserts it at the front.
    ///
    /// The returned note is fully usable immediately: the id is generated
    /// synchronously and is final.
    pub fn create_note(&mut self, draft: NoteDraft) -> Note {
        let note = Note::from_draft(draft, now_timestamp());
        debug!("event=note_create module=store status=ok id={}", note.id);
        self.notes.insert(0, note.clone());
        self.schedule_persist();
        note
    }

    /// Merges the patch into the note with `id` and refreshes `updated_at`.
    pub fn update_note(&mut self, id: &str, patch: NotePatch) {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            debug!("event=note_update module=store status=skipped reason=unknown_id id={id}");
            return;
        };

        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(body) = patch.body {
            note.body = body;
        }
        if let Some(course) = patch.course {
            note.course = course;
        }
        if let Some(tags) = patch.tags {
            note.tags = dedupe_tags(tags);
        }
        if let Some(format) = patch.format {
            note.format = format;
        }
        note.updated_at = now_timestamp();
        self.schedule_persist();
    }

    /// Removes the note with `id` permanently.
    pub fn delete_note(&mut self, id: &str) {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            debug!("event=note_delete module=store status=skipped reason=unknown_id id={id}");
            return;
        }
        debug!("event=note_delete module=store status=ok id={id}");
        self.schedule_persist();
    }

    /// Appends a tag to the note with `id`.
    ///
    /// Adding a tag the note already carries is a no-op: the collection,
    /// `updated_at` included, is left unchanged.
    pub fn add_tag(&mut self, id: &str, tag: impl Into<String>) {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            return;
        };
        if note.add_tag(tag) {
            note.updated_at = now_timestamp();
            self.schedule_persist();
        }
    }

    /// Removes a tag from the note with `id`; absent tags are a no-op.
    pub fn remove_tag(&mut self, id: &str, tag: &str) {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            return;
        };
        if note.remove_tag(tag) {
            note.updated_at = now_timestamp();
            self.schedule_persist();
        }
    }

    /// The full canonical collection, most-recent-first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Derived filtered view, recomputed from its inputs on every call.
    ///
    /// A note is included iff it matches the search text (case-insensitive
    /// substring over title, body, or any tag), the course filter
    /// (case-insensitive exact), and every active tag filter (AND).
    /// Collection order is preserved; filtering never re-sorts.
    pub fn filtered(&self) -> Vec<&Note> {
        let query = self.search.to_lowercase();
        let course = self.course_filter.to_lowercase();

        self.notes
            .iter()
            .filter(|note| {
                let matches_search = query.is_empty()
                    || note.title.to_lowercase().contains(&query)
                    || note.body.to_lowercase().contains(&query)
                    || note.tags.iter().any(|tag| tag.to_lowercase().contains(&query));
                let matches_course = course.is_empty() || note.course.to_lowercase() == course;
                let matches_tags = self.active_tag_filters.is_empty()
                    || self
                        .active_tag_filters
                        .iter()
                        .all(|tag| note.tags.contains(tag));
                matches_search && matches_course && matches_tags
            })
            .collect()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn course_filter(&self) -> &str {
        &self.course_filter
    }

    pub fn set_course_filter(&mut self, course: impl Into<String>) {
        self.course_filter = course.into();
    }

    pub fn active_tag_filters(&self) -> &[String] {
        &self.active_tag_filters
    }

    /// Adds the tag to the active filter set, or removes it if present.
    pub fn toggle_tag_filter(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        let before = self.active_tag_filters.len();
        self.active_tag_filters.retain(|existing| *existing != tag);
        if self.active_tag_filters.len() == before {
            self.active_tag_filters.push(tag);
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flips the color scheme. Theme is part of persisted metadata.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.schedule_persist();
    }

    /// Serializes the full unfiltered collection plus theme, pretty-printed.
    pub fn export_bundle(&self) -> String {
        encode_bundle(&self.notes, self.theme)
    }

    /// Validates the bundle and replaces the entire collection.
    ///
    /// On any [`crate::bundle::ImportError`] the collection is left
    /// untouched. On success the surviving notes, sorted by `updated_at`
    /// descending, become the new canonical collection.
    pub fn import_bundle(&mut self, json: &str) -> ImportResult<ImportReport> {
        let decoded = decode_bundle(json)?;
        let report = ImportReport {
            imported: decoded.notes.len(),
            dropped: decoded.dropped,
        };
        info!(
            "event=bundle_import module=store status=ok imported={} dropped={}",
            report.imported, report.dropped
        );
        self.notes = decoded.notes;
        self.schedule_persist();
        Ok(report)
    }

    /// Forces any pending debounced write to land before returning.
    pub fn flush(&self) {
        self.scheduler.flush();
    }

    fn schedule_persist(&self) {
        self.scheduler
            .schedule(encode_persist_state(&self.notes, self.theme));
    }
}
