//! Core domain logic for catatan, a local-first lecture-note store.
//!
//! The crate owns the canonical note collection, its derived filter view,
//! the debounced persistence pipeline, the minimal markdown preview
//! renderer, and the single-note exporters. Presentation layers consume it
//! through an explicit [`store::NoteStore`] handle.

pub mod bundle;
pub mod export;
pub mod logging;
pub mod model;
pub mod render;
pub mod storage;
pub mod store;
pub mod time;

pub use bundle::{decode_bundle, encode_bundle, DecodedBundle, ImportError, BUNDLE_VERSION};
pub use export::{
    filename_slug, pdf_filename, render_note_pdf, render_note_txt, txt_filename, ExportError,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{Note, NoteDraft, NoteFormat, NotePatch, Theme};
pub use render::{markdown_to_html, strip_markdown};
pub use storage::{MemoryStorage, SqliteStorage, StorageAdapter, StorageError};
pub use store::{ImportReport, NoteStore, StoreOptions, DEFAULT_DEBOUNCE, STORAGE_KEY};
pub use time::{now_timestamp, relative_time, relative_time_from_now};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
