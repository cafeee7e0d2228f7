//! The note store: an id → note mapping mirrored into a local storage slot.
//!
//! Every mutation is followed by a full write of the mapping. Write failures
//! are logged and otherwise ignored; an unreadable slot is treated as empty.

use crate::error::StorageError;
use crate::models::{Note, NoteMap};
use crate::notes::derive_title;
use crate::storage::{LocalStorage, LAST_NOTE_KEY, NOTES_KEY};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

pub struct NoteStore<S: LocalStorage> {
    storage: S,
    notes: NoteMap,
}

/// Recency order used by the sidebar and the fallbacks: newest `updated_at`
/// first, ties broken by id.
pub fn by_recency(a: &Note, b: &Note) -> Ordering {
    b.updated_at
        .cmp(&a.updated_at)
        .then_with(|| a.id.cmp(&b.id))
}

impl<S: LocalStorage> NoteStore<S> {
    /// Create a store over `storage` and load whatever it holds.
    pub fn new(storage: S) -> Self {
        let mut store = Self {
            storage,
            notes: NoteMap::new(),
        };
        store.load();
        store
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    /// Replace the in-memory mapping with the persisted one.
    pub fn load(&mut self) {
        self.notes = match self.storage.get_item(NOTES_KEY) {
            Ok(Some(raw)) => match Self::from_json(&raw) {
                Ok(notes) => notes,
                Err(e) => {
                    log::error!("Error loading notes from storage: {}", e);
                    NoteMap::new()
                }
            },
            Ok(None) => NoteMap::new(),
            Err(e) => {
                log::error!("Error loading notes from storage: {}", e);
                NoteMap::new()
            }
        };
    }

    /// Write the full mapping, logging any failure.
    pub fn save(&mut self) {
        if let Err(e) = self.try_save() {
            log::error!("Error saving notes to storage: {}", e);
        }
    }

    pub fn try_save(&mut self) -> Result<(), StorageError> {
        let json = Self::to_json(&self.notes)?;
        self.storage.set_item(NOTES_KEY, &json)
    }

    pub fn to_json(notes: &NoteMap) -> Result<String, StorageError> {
        Ok(serde_json::to_string(notes)?)
    }

    pub fn from_json(raw: &str) -> Result<NoteMap, StorageError> {
        Ok(serde_json::from_str(raw)?)
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    pub fn upsert(&mut self, id: &str, content: &str) -> &Note {
        self.upsert_at(id, content, Utc::now())
    }

    /// Create `id` with `created_at = updated_at = now`, or update its content,
    /// title and `updated_at` while keeping `created_at`.
    pub fn upsert_at(&mut self, id: &str, content: &str, now: DateTime<Utc>) -> &Note {
        let note = self
            .notes
            .entry(id.to_string())
            .and_modify(|note| {
                note.title = derive_title(content);
                note.content = content.to_string();
                note.updated_at = now;
            })
            .or_insert_with(|| Note::new(id, content, now));
        &*note
    }

    /// Insert a fully-formed note, replacing any note with the same id.
    pub fn insert(&mut self, note: Note) {
        self.notes.insert(note.id.clone(), note);
    }

    /// Delete `id`. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Note> {
        self.notes.remove(id)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.notes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn notes(&self) -> &NoteMap {
        &self.notes
    }

    pub fn most_recent(&self) -> Option<&Note> {
        self.notes.values().min_by(|a, b| by_recency(a, b))
    }

    pub fn sorted_by_recency(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.values().collect();
        notes.sort_by(|a, b| by_recency(a, b));
        notes
    }

    // ------------------------------------------------------------------------
    // Last-edited marker
    // ------------------------------------------------------------------------

    pub fn last_edited(&self) -> Option<String> {
        match self.storage.get_item(LAST_NOTE_KEY) {
            Ok(marker) => marker.filter(|id| !id.is_empty()),
            Err(e) => {
                log::error!("Error reading last edited note: {}", e);
                None
            }
        }
    }

    pub fn set_last_edited(&mut self, id: &str) {
        match self.storage.set_item(LAST_NOTE_KEY, id) {
            Ok(()) => log::debug!("Saved last note ID: {}", id),
            Err(e) => log::error!("Error saving last edited note: {}", e),
        }
    }

    pub fn clear_last_edited(&mut self) {
        if let Err(e) = self.storage.remove_item(LAST_NOTE_KEY) {
            log::error!("Error clearing last edited note: {}", e);
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
