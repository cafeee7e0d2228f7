//! Current-note resolution.
//!
//! Decides which note the editor shows on start-up and after back/forward
//! navigation. First match wins: an id named by the URL, then the last-edited
//! marker, then the most recently updated note, and finally a freshly
//! created welcome note.

use crate::models::NoteMap;
use crate::store::by_recency;

/// Content of the note created when the store is empty.
pub const WELCOME_CONTENT: &str =
    "Welcome to blank.page\n\nStart typing to create your first note...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The URL names an existing note. The URL is left as is.
    FromUrl(String),
    /// The last-edited marker names an existing note. The URL is rewritten.
    LastEdited(String),
    /// Most recently updated note. The URL is rewritten.
    MostRecent(String),
    /// Store is empty: a welcome note must be created.
    Welcome,
}

impl Resolution {
    pub fn note_id(&self) -> Option<&str> {
        match self {
            Resolution::FromUrl(id) | Resolution::LastEdited(id) | Resolution::MostRecent(id) => {
                Some(id)
            }
            Resolution::Welcome => None,
        }
    }

    /// Whether the URL must be replaced to name the selected note.
    pub fn rewrites_url(&self) -> bool {
        !matches!(self, Resolution::FromUrl(_))
    }
}

pub fn resolve(notes: &NoteMap, url_note: Option<&str>, last_edited: Option<&str>) -> Resolution {
    if let Some(id) = url_note.filter(|id| notes.contains_key(*id)) {
        return Resolution::FromUrl(id.to_string());
    }

    if let Some(id) = last_edited.filter(|id| notes.contains_key(*id)) {
        return Resolution::LastEdited(id.to_string());
    }

    match notes.values().min_by(|a, b| by_recency(a, b)) {
        Some(note) => Resolution::MostRecent(note.id.clone()),
        None => Resolution::Welcome,
    }
}
