use catatan_core::{MemoryStorage, NoteDraft, NotePatch, NoteStore};
use std::sync::Arc;

fn draft(title: &str, body: &str, course: &str, tags: &[&str]) -> NoteDraft {
    NoteDraft {
        title: Some(title.to_string()),
        body: Some(body.to_string()),
        course: Some(course.to_string()),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        format: None,
    }
}

/// Store with three notes; front-insertion makes "Sejarah" positionally first.
fn seeded_store() -> NoteStore {
    let mut store = NoteStore::open_default(Arc::new(MemoryStorage::new()));
    store.create_note(draft(
        "Limit fungsi",
        "Definisi epsilon-delta",
        "Kalkulus",
        &["limit", "penting"],
    ));
    store.create_note(draft(
        "Integral",
        "Luas di bawah kurva, pakai limit juga",
        "Kalkulus",
        &["integral"],
    ));
    store.create_note(draft(
        "Sejarah komputer",
        "Dari abakus ke transistor",
        "Informatika",
        &["sejarah", "penting"],
    ));
    store
}

#[test]
fn empty_filters_return_everything_in_collection_order() {
    let store = seeded_store();
    let titles: Vec<&str> = store.filtered().iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Sejarah komputer", "Integral", "Limit fungsi"]);
}

#[test]
fn search_matches_title_body_and_tags_case_insensitively() {
    let mut store = seeded_store();

    store.set_search("LIMIT");
    let titles: Vec<&str> = store.filtered().iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Integral", "Limit fungsi"]);

    store.set_search("abakus");
    let titles: Vec<&str> = store.filtered().iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Sejarah komputer"]);

    store.set_search("PENTING");
    let titles: Vec<&str> = store.filtered().iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Sejarah komputer", "Limit fungsi"]);

    store.set_search("tidak-ada");
    assert!(store.filtered().is_empty());
}

#[test]
fn course_filter_is_exact_but_case_insensitive() {
    let mut store = seeded_store();

    store.set_course_filter("kalkulus");
    assert_eq!(store.filtered().len(), 2);

    store.set_course_filter("Kal");
    assert!(store.filtered().is_empty());

    store.set_course_filter("");
    assert_eq!(store.filtered().len(), 3);
}

#[test]
fn tag_filters_combine_with_and_semantics() {
    let mut store = seeded_store();

    store.toggle_tag_filter("penting");
    assert_eq!(store.filtered().len(), 2);

    store.toggle_tag_filter("limit");
    let titles: Vec<&str> = store.filtered().iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Limit fungsi"]);

    // Toggling again removes the filter.
    store.toggle_tag_filter("limit");
    assert_eq!(store.filtered().len(), 2);
    assert_eq!(store.active_tag_filters(), ["penting"]);
}

#[test]
fn combined_predicates_narrow_to_the_intersection() {
    let mut store = seeded_store();
    store.set_search("limit");
    store.set_course_filter("Kalkulus");
    store.toggle_tag_filter("limit");
    store.toggle_tag_filter("penting");

    let titles: Vec<&str> = store.filtered().iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Limit fungsi"]);
}

#[test]
fn filtered_view_tracks_mutations_immediately() {
    let mut store = seeded_store();
    store.set_search("transistor");
    assert_eq!(store.filtered().len(), 1);

    let id = store.filtered()[0].id.clone();
    store.update_note(
        &id,
        NotePatch {
            body: Some("Dari abakus ke chip".to_string()),
            ..NotePatch::default()
        },
    );
    assert!(store.filtered().is_empty());

    store.delete_note(&id);
    store.set_search("");
    assert_eq!(store.filtered().len(), 2);
}
