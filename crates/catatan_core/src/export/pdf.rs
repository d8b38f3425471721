//! PDF single-note export.
//!
//! # Responsibility
//! - Render one note to an A4 single-column PDF byte stream.
//!
//! # Invariants
//! - Markdown bodies are stripped to plain text before layout.
//! - Paragraphs are whitespace-normalized, word-wrapped to the text width,
//!   and paginated when vertical space runs out.

use super::{ExportError, ExportResult};
use crate::model::{Note, NoteFormat};
use crate::render::strip_markdown;
use once_cell::sync::Lazy;
use printpdf::{BuiltinFont, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use regex::Regex;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 17.0;
const TEXT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
const PT_TO_MM: f32 = 0.352_778;

const TITLE_SIZE_PT: f32 = 16.0;
const META_SIZE_PT: f32 = 10.0;
const BODY_SIZE_PT: f32 = 11.0;

const TITLE_LEADING_MM: f32 = 8.0;
const META_LEADING_MM: f32 = 5.0;
const BODY_LEADING_MM: f32 = 5.6;
const PARAGRAPH_GAP_MM: f32 = 3.0;

static PARAGRAPH_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("valid paragraph split regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Renders `note` as an A4 PDF and returns the document bytes.
pub fn render_note_pdf(note: &Note) -> ExportResult<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        note.display_title(),
        Mm(PAGE_WIDTH_MM.into()),
        Mm(PAGE_HEIGHT_MM.into()),
        "content",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| ExportError::PdfRender(err.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| ExportError::PdfRender(err.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut baseline_mm = PAGE_HEIGHT_MM - MARGIN_MM;

    layer.use_text(
        note.display_title(),
        TITLE_SIZE_PT.into(),
        Mm(MARGIN_MM.into()),
        Mm(baseline_mm.into()),
        &bold,
    );
    advance(&doc, &mut layer, &mut baseline_mm, TITLE_LEADING_MM);

    for line in metadata_lines(note) {
        layer.use_text(
            line,
            META_SIZE_PT.into(),
            Mm(MARGIN_MM.into()),
            Mm(baseline_mm.into()),
            &regular,
        );
        advance(&doc, &mut layer, &mut baseline_mm, META_LEADING_MM);
    }
    advance(&doc, &mut layer, &mut baseline_mm, PARAGRAPH_GAP_MM);

    let body = match note.format {
        NoteFormat::Markdown => strip_markdown(&note.body),
        NoteFormat::Plain => note.body.clone(),
    };
    let max_chars = max_chars_per_line(BODY_SIZE_PT);
    for paragraph in PARAGRAPH_SPLIT_RE.split(&body) {
        let normalized = WHITESPACE_RE.replace_all(paragraph.trim(), " ");
        if normalized.is_empty() {
            continue;
        }
        for line in wrap_words(&normalized, max_chars) {
            layer.use_text(
                line,
                BODY_SIZE_PT.into(),
                Mm(MARGIN_MM.into()),
                Mm(baseline_mm.into()),
                &regular,
            );
            advance(&doc, &mut layer, &mut baseline_mm, BODY_LEADING_MM);
        }
        advance(&doc, &mut layer, &mut baseline_mm, PARAGRAPH_GAP_MM);
    }

    doc.save_to_bytes()
        .map_err(|err| ExportError::PdfRender(err.to_string()))
}

/// Moves the baseline down, starting a fresh page when the margin is hit.
fn advance(
    doc: &PdfDocumentReference,
    layer: &mut PdfLayerReference,
    baseline_mm: &mut f32,
    step_mm: f32,
) {
    *baseline_mm -= step_mm;
    if *baseline_mm < MARGIN_MM {
        let (page, new_layer) =
            doc.add_page(Mm(PAGE_WIDTH_MM.into()), Mm(PAGE_HEIGHT_MM.into()), "content");
        *layer = doc.get_page(page).get_layer(new_layer);
        *baseline_mm = PAGE_HEIGHT_MM - MARGIN_MM;
    }
}

fn metadata_lines(note: &Note) -> Vec<String> {
    let mut lines = Vec::with_capacity(4);
    if !note.course.is_empty() {
        lines.push(format!("Mata Kuliah: {}", note.course));
    }
    if !note.tags.is_empty() {
        lines.push(format!("Tags: {}", note.tags.join(", ")));
    }
    lines.push(format!("Dibuat: {}", note.created_at));
    lines.push(format!("Diubah: {}", note.updated_at));
    lines
}

/// Conservative character budget for one wrapped line.
///
/// The built-in Helvetica has no exposed glyph metrics, so wrapping uses an
/// average glyph width of half the font size.
fn max_chars_per_line(font_size_pt: f32) -> usize {
    let avg_glyph_mm = font_size_pt * 0.5 * PT_TO_MM;
    ((TEXT_WIDTH_MM / avg_glyph_mm) as usize).max(1)
}

/// Greedy word wrap; words longer than the budget get a line of their own.
fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
