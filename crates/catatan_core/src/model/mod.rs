//! Domain model types for catatan core.

pub mod note;

pub use note::{dedupe_tags, Note, NoteDraft, NoteFormat, NotePatch, Theme};
