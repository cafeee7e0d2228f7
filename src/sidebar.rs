//! Sidebar projection: the note list shown next to the editor.

use crate::models::Note;
use crate::store::by_recency;
use chrono::{DateTime, Utc};

/// Text shown in place of the list when there are no notes.
pub const EMPTY_SIDEBAR: &str = "No notes yet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub id: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    pub active: bool,
}

impl SidebarEntry {
    /// Date label, e.g. `2024-03-01`.
    pub fn date_label(&self) -> String {
        self.updated_at.format("%Y-%m-%d").to_string()
    }
}

/// All notes, newest first, with `current` marked active.
pub fn project<'a, I>(notes: I, current: Option<&str>) -> Vec<SidebarEntry>
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut sorted: Vec<&Note> = notes.into_iter().collect();
    sorted.sort_by(|a, b| by_recency(a, b));

    sorted
        .into_iter()
        .map(|note| SidebarEntry {
            id: note.id.clone(),
            title: note.title.clone(),
            updated_at: note.updated_at,
            active: current == Some(note.id.as_str()),
        })
        .collect()
}
