use catatan_core::{
    pdf_filename, render_note_pdf, render_note_txt, txt_filename, Note, NoteDraft, NoteFormat,
};

fn note_with(title: &str, body: &str, format: NoteFormat) -> Note {
    let draft = NoteDraft {
        title: Some(title.to_string()),
        body: Some(body.to_string()),
        course: Some("Kalkulus".to_string()),
        tags: Some(vec!["limit".to_string()]),
        format: Some(format),
    };
    Note::from_draft(draft, "2026-01-01T00:00:00.000Z")
}

#[test]
fn txt_export_has_stable_filename_and_layout() {
    let note = note_with("Bab 1: Limit!", "Isi.", NoteFormat::Plain);
    assert_eq!(txt_filename(&note), "bab-1-limit.txt");

    let text = render_note_txt(&note);
    assert!(text.starts_with("Judul: Bab 1: Limit!\n"));
    assert!(text.contains("Mata Kuliah: Kalkulus\n"));
    assert!(text.contains("Tags: limit\n"));
    assert!(text.ends_with("\n\nIsi."));
}

#[test]
fn empty_title_falls_back_per_export_kind() {
    let mut note = note_with("x", "Isi.", NoteFormat::Plain);
    note.title.clear();

    assert_eq!(txt_filename(&note), "catatan.txt");
    assert_eq!(pdf_filename(&note), "tanpa-judul.pdf");
}

#[test]
fn pdf_export_produces_a_pdf_byte_stream() {
    let note = note_with("Bab 1", "Paragraf satu.\n\nParagraf dua.", NoteFormat::Plain);
    let bytes = render_note_pdf(&note).expect("pdf renders");

    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 500);
}

#[test]
fn markdown_body_is_stripped_before_pdf_layout() {
    let note = note_with(
        "Markdown",
        "# Judul bagian\n\n**tebal** dan `kode`",
        NoteFormat::Markdown,
    );
    let bytes = render_note_pdf(&note).expect("pdf renders");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn long_body_paginates_without_error() {
    let paragraph = "kata ".repeat(400);
    let body = vec![paragraph; 10].join("\n\n");
    let short = render_note_pdf(&note_with("Pendek", "satu baris", NoteFormat::Plain))
        .expect("short pdf renders");
    let long =
        render_note_pdf(&note_with("Panjang", &body, NoteFormat::Plain)).expect("long pdf renders");

    assert!(long.len() > short.len());
}
