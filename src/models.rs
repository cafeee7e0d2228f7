//! Data models for the blankpage application.
//!
//! This module contains the note record kept in local storage, the wire types
//! exchanged with the share service, and the records the share server keeps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Core Note Types
// ============================================================================

/// A user-authored note as persisted in the local notes slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Build a note whose title is derived from `content`.
    pub fn new(id: impl Into<String>, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        let content = content.into();
        Self {
            id: id.into(),
            title: crate::notes::derive_title(&content),
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The full notes mapping, keyed by note id.
pub type NoteMap = HashMap<String, Note>;

// ============================================================================
// Share Service Wire Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub title: String,
    pub content: String,
    /// Lifetime of the link in hours; 0 means the link never expires.
    #[serde(default)]
    pub expiry_hours: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub share_id: String,
    pub share_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Expiry choices offered by the share dialog, in hours.
pub const SHARE_EXPIRY_CHOICES: &[(i64, &str)] = &[
    (1, "1 hour"),
    (24, "24 hours"),
    (168, "7 days"),
    (720, "30 days"),
    (0, "Never expires"),
];

pub const DEFAULT_SHARE_EXPIRY_HOURS: i64 = 168;

// ============================================================================
// Shared Note Records (server side)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SharedNote {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SharedNote {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => expires < now,
            None => false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareStats {
    pub total_notes: usize,
    pub total_words: usize,
}
