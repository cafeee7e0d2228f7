//! String-keyed persistent slots for the editor.
//!
//! The editor keeps everything it persists in a handful of named string
//! slots, the way a browser page uses local storage. `SledStorage` keeps the
//! slots on disk; `MemoryStorage` keeps them in a map.

use crate::error::StorageError;
use std::collections::HashMap;
use std::path::Path;

/// Slot holding the JSON-serialized notes mapping.
pub const NOTES_KEY: &str = "blankpage_notes";

/// Slot holding the id of the last edited note.
pub const LAST_NOTE_KEY: &str = "blankpage_last_note";

/// Slot holding the colour theme (`light` or `dark`).
pub const THEME_KEY: &str = "theme";

const SLOTS_TREE: &str = "local_storage";

pub trait LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

// ============================================================================
// Sled-backed storage
// ============================================================================

pub struct SledStorage {
    tree: sled::Tree,
}

impl SledStorage {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Self::from_db(&db)
    }

    pub fn from_db(db: &sled::Db) -> Result<Self, StorageError> {
        Ok(Self {
            tree: db.open_tree(SLOTS_TREE)?,
        })
    }
}

impl LocalStorage for SledStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.tree.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|_| StorageError::InvalidUtf8(key.to_string())),
            None => Ok(None),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.tree.insert(key.as_bytes(), value.as_bytes())?;
        self.tree.flush()?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.tree.remove(key.as_bytes())?;
        self.tree.flush()?;
        Ok(())
    }
}

// ============================================================================
// In-memory storage
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with the given slots.
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: items
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}
