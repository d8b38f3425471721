//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record persisted and exported by the store.
//! - Provide creation defaults and tag-set helpers.
//!
//! # Invariants
//! - `id` is unique across the live collection and never reused.
//! - `created_at <= updated_at` at all times (both are sortable ISO-8601
//!   UTC strings).
//! - `tags` preserves insertion order and never contains duplicates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default title applied when a draft carries none.
pub const DEFAULT_TITLE: &str = "Catatan Baru";

/// Placeholder shown for notes whose title is empty.
pub const UNTITLED_LABEL: &str = "Tanpa Judul";

/// Body rendering mode. Absent on the wire means [`NoteFormat::Plain`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteFormat {
    /// Raw text, rendered verbatim.
    #[default]
    Plain,
    /// Minimal markdown subset (see [`crate::render`]).
    Markdown,
}

/// UI color scheme. Persisted as part of store metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the opposite scheme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Canonical note record.
///
/// Wire field names are camelCase to stay compatible with bundles exported
/// by earlier versions of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Opaque unique identifier.
    pub id: String,
    /// Free text; may be empty (display falls back to [`UNTITLED_LABEL`]).
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Optional course classifier; empty string means unset.
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: String,
    #[serde(default)]
    pub format: NoteFormat,
}

impl Note {
    /// Builds a note from a creation draft with a fresh synchronous id.
    ///
    /// Empty draft fields fall back to defaults; both timestamps are set to
    /// the provided creation instant.
    pub fn from_draft(draft: NoteDraft, now: impl Into<String>) -> Self {
        let now = now.into();
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft
                .title
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: draft.body.unwrap_or_default(),
            course: draft.course.unwrap_or_default(),
            tags: dedupe_tags(draft.tags.unwrap_or_default()),
            created_at: now.clone(),
            updated_at: now,
            format: draft.format.unwrap_or_default(),
        }
    }

    /// Returns the title, or the untitled placeholder when it is empty.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED_LABEL
        } else {
            &self.title
        }
    }

    /// Appends a tag if absent. Returns whether the tag set changed.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.tags.iter().any(|existing| *existing == tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Removes a tag if present. Returns whether the tag set changed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag);
        self.tags.len() != before
    }
}

/// Optional fields supplied at creation time.
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub title: Option<String>,
    pub body: Option<String>,
    pub course: Option<String>,
    pub tags: Option<Vec<String>>,
    pub format: Option<NoteFormat>,
}

/// Field-wise merge patch for [`crate::store::NoteStore::update_note`].
///
/// `None` leaves the field untouched; timestamps are owned by the store and
/// cannot be patched directly.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub course: Option<String>,
    pub tags: Option<Vec<String>>,
    pub format: Option<NoteFormat>,
}

/// Removes duplicate tags while preserving first-occurrence order.
pub fn dedupe_tags(tags: Vec<String>) -> Vec<String> {
    let mut unique = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::{dedupe_tags, Note, NoteDraft, NoteFormat, Theme};

    #[test]
    fn draft_defaults_apply() {
        let note = Note::from_draft(NoteDraft::default(), "2026-01-01T00:00:00.000Z");
        assert_eq!(note.title, "Catatan Baru");
        assert!(note.body.is_empty());
        assert!(note.course.is_empty());
        assert!(note.tags.is_empty());
        assert_eq!(note.format, NoteFormat::Plain);
        assert_eq!(note.created_at, note.updated_at);
        assert!(!note.id.is_empty());
    }

    #[test]
    fn empty_draft_title_falls_back_to_default() {
        let draft = NoteDraft {
            title: Some(String::new()),
            ..NoteDraft::default()
        };
        let note = Note::from_draft(draft, "2026-01-01T00:00:00.000Z");
        assert_eq!(note.title, "Catatan Baru");
    }

    #[test]
    fn display_title_uses_placeholder_for_empty_title() {
        let draft = NoteDraft {
            title: Some(String::new()),
            ..NoteDraft::default()
        };
        let mut note = Note::from_draft(draft, "2026-01-01T00:00:00.000Z");
        note.title.clear();
        assert_eq!(note.display_title(), "Tanpa Judul");
    }

    #[test]
    fn tag_add_and_remove_are_idempotent() {
        let mut note = Note::from_draft(NoteDraft::default(), "2026-01-01T00:00:00.000Z");
        assert!(note.add_tag("kalkulus"));
        assert!(!note.add_tag("kalkulus"));
        assert_eq!(note.tags, vec!["kalkulus".to_string()]);

        assert!(note.remove_tag("kalkulus"));
        assert!(!note.remove_tag("kalkulus"));
        assert!(note.tags.is_empty());
    }

    #[test]
    fn dedupe_preserves_insertion_order() {
        let tags = vec![
            "b".to_string(),
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ];
        assert_eq!(dedupe_tags(tags), vec!["b", "a", "c"]);
    }

    #[test]
    fn theme_toggles_between_light_and_dark() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn note_wire_format_uses_camel_case_timestamps() {
        let note = Note::from_draft(NoteDraft::default(), "2026-01-01T00:00:00.000Z");
        let json = serde_json::to_value(&note).expect("note serializes");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json.get("format").and_then(|v| v.as_str()), Some("plain"));
    }
}
