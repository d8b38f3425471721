//! Single-note exporters.
//!
//! # Responsibility
//! - Render one note to a plain-text or PDF byte stream.
//! - Derive safe download filenames from note titles.
//!
//! # Invariants
//! - Rendering never mutates the note and never panics; PDF failures
//!   surface as [`ExportError`].

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod pdf;
mod text;

pub use pdf::render_note_pdf;
pub use text::render_note_txt;

use crate::model::Note;

/// Fallback slug when a sanitized title collapses to nothing.
const DEFAULT_SLUG: &str = "catatan";

const SLUG_MAX_CHARS: usize = 60;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9-_]+").expect("valid slug regex"));

pub type ExportResult<T> = Result<T, ExportError>;

/// Export-layer failure. Only the PDF backend can fail today.
#[derive(Debug)]
pub enum ExportError {
    PdfRender(String),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PdfRender(message) => write!(f, "pdf rendering failed: {message}"),
        }
    }
}

impl Error for ExportError {}

/// Sanitizes a title into a download-safe slug.
///
/// Lowercased; runs of characters outside `[a-z0-9-_]` collapse to one
/// hyphen; leading/trailing hyphens are trimmed; result is capped at 60
/// characters and falls back to `catatan` when empty.
pub fn filename_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let replaced = SLUG_RE.replace_all(&lowered, "-");
    let trimmed = replaced.trim_matches('-');
    let truncated: String = trimmed.chars().take(SLUG_MAX_CHARS).collect();
    if truncated.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        truncated
    }
}

/// Download filename for the TXT export of `note`.
pub fn txt_filename(note: &Note) -> String {
    format!("{}.txt", filename_slug(&note.title))
}

/// Download filename for the PDF export of `note`.
///
/// Uses the untitled placeholder for empty titles, matching the PDF body
/// header.
pub fn pdf_filename(note: &Note) -> String {
    format!("{}.pdf", filename_slug(note.display_title()))
}

#[cfg(test)]
mod tests {
    use super::filename_slug;

    #[test]
    fn slug_collapses_and_trims() {
        assert_eq!(filename_slug("Catatan Kalkulus: Bab 2!"), "catatan-kalkulus-bab-2");
        assert_eq!(filename_slug("---"), "catatan");
        assert_eq!(filename_slug(""), "catatan");
        assert_eq!(filename_slug("snake_case-ok123"), "snake_case-ok123");
    }

    #[test]
    fn slug_truncates_to_sixty_chars() {
        let long = "a".repeat(100);
        assert_eq!(filename_slug(&long).len(), 60);
    }
}
