//! Versioned export/import bundle codec and persisted blob shapes.
//!
//! # Responsibility
//! - Serialize the full note collection (plus theme) for export and for
//!   the durable storage blob.
//! - Validate imported bundles, tolerating partial per-note corruption.
//!
//! # Invariants
//! - Export always emits `version: 1` and every note in the store.
//! - Import is destructive-replace at the bundle level: it either fails
//!   wholesale (parse error, bad shape, unsupported version) or yields a
//!   collection sorted by `updatedAt` descending.
//! - Individual malformed note entries are dropped, never fatal.

use crate::model::{Note, Theme};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The only bundle version this build reads and writes.
pub const BUNDLE_VERSION: u64 = 1;

pub type ImportResult<T> = Result<T, ImportError>;

/// User-facing failure for the import path.
///
/// This is the one surface where malformed external input is reported
/// instead of silently recovered (storage blobs reset to empty instead).
#[derive(Debug)]
pub enum ImportError {
    /// Top-level JSON parse failure.
    Parse(String),
    /// Parsed, but `notes` is missing or not an array.
    InvalidShape,
    /// Bundle declares a version other than [`BUNDLE_VERSION`].
    UnsupportedVersion(u64),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "JSON tidak dapat dibaca: {message}"),
            Self::InvalidShape => write!(f, "Format tidak valid"),
            Self::UnsupportedVersion(version) => {
                write!(f, "Versi bundel tidak didukung: {version}")
            }
        }
    }
}

impl Error for ImportError {}

/// Point-in-time serialization view over the store's state.
#[derive(Debug, Serialize)]
pub struct NotesBundle<'a> {
    pub version: u64,
    pub notes: &'a [Note],
    pub meta: BundleMeta,
}

/// Bundle/blob metadata. Only the theme is carried today.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BundleMeta {
    #[serde(default)]
    pub theme: Theme,
}

/// Shape of the durable storage blob (legacy, unversioned).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PersistState {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub meta: BundleMeta,
}

/// Outcome of a successful import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBundle {
    /// Surviving notes, sorted by `updated_at` descending.
    pub notes: Vec<Note>,
    /// Entries dropped by per-note validation.
    pub dropped: usize,
}

/// Serializes the full collection plus theme as a pretty-printed bundle.
pub fn encode_bundle(notes: &[Note], theme: Theme) -> String {
    let bundle = NotesBundle {
        version: BUNDLE_VERSION,
        notes,
        meta: BundleMeta { theme },
    };
    // Plain data with string keys; serialization cannot fail.
    serde_json::to_string_pretty(&bundle).expect("bundle serializes")
}

/// Parses and validates an external bundle.
///
/// Entries that are not well-formed notes, or that carry an empty id, are
/// dropped. An absent `version` field is tolerated for compatibility with
/// exports predating the field.
pub fn decode_bundle(json: &str) -> ImportResult<DecodedBundle> {
    let parsed: Value =
        serde_json::from_str(json).map_err(|err| ImportError::Parse(err.to_string()))?;

    if let Some(version) = parsed.get("version") {
        match version.as_u64() {
            Some(BUNDLE_VERSION) => {}
            Some(other) => return Err(ImportError::UnsupportedVersion(other)),
            None => return Err(ImportError::InvalidShape),
        }
    }

    let entries = match parsed.get("notes").and_then(Value::as_array) {
        Some(entries) => entries,
        None => return Err(ImportError::InvalidShape),
    };

    let mut notes = Vec::with_capacity(entries.len());
    let mut dropped = 0;
    for entry in entries {
        match serde_json::from_value::<Note>(entry.clone()) {
            Ok(note) if !note.id.is_empty() => notes.push(note),
            _ => dropped += 1,
        }
    }

    // Most recently modified first; timestamps sort lexicographically.
    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    Ok(DecodedBundle { notes, dropped })
}

/// Serializes the storage blob written by the persistence scheduler.
pub fn encode_persist_state(notes: &[Note], theme: Theme) -> String {
    let state = PersistState {
        notes: notes.to_vec(),
        meta: BundleMeta { theme },
    };
    serde_json::to_string(&state).expect("persist state serializes")
}

/// Decodes the storage blob loaded at startup.
///
/// Absent or malformed blobs yield the empty default state; corruption in
/// durable storage is never surfaced to the user.
pub fn decode_persist_state(raw: Option<&str>) -> PersistState {
    match raw {
        None => PersistState::default(),
        Some(text) => serde_json::from_str(text).unwrap_or_else(|err| {
            log::warn!(
                "event=state_load module=bundle status=recovered error={err}"
            );
            PersistState::default()
        }),
    }
}
