//! Plain-text single-note export.

use crate::model::Note;

/// Renders a note as deterministic UTF-8 plain text.
///
/// Layout: title line, course line if set, tags line if any, created and
/// updated timestamps, one blank separator line, then the raw body.
pub fn render_note_txt(note: &Note) -> String {
    let mut lines = Vec::with_capacity(7);
    lines.push(format!("Judul: {}", note.title));
    if !note.course.is_empty() {
        lines.push(format!("Mata Kuliah: {}", note.course));
    }
    if !note.tags.is_empty() {
        lines.push(format!("Tags: {}", note.tags.join(", ")));
    }
    lines.push(format!("Dibuat: {}", note.created_at));
    lines.push(format!("Diubah: {}", note.updated_at));
    lines.push(String::new());
    lines.push(note.body.clone());
    lines.join("\n")
}
