//! HTTP route handlers for the share server.
//!
//! Shared-note creation and viewing live in `shared`; this module holds the
//! landing page, search, statistics, downloads and the health check.

use crate::models::{ShareStats, SharedNote};
use crate::notes::{search_shared_notes, DocumentStats, UNTITLED};
use crate::shared::{load_all_shared, lookup_shared, Lookup};
use crate::templates::{base_html, render_landing};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

/// JSON `{"error": message}` body with `status`.
pub(crate) fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn live_notes(state: &AppState) -> Vec<SharedNote> {
    let now = Utc::now();
    load_all_shared(&state.db)
        .into_iter()
        .filter(|n| !n.is_expired(now))
        .collect()
}

// ============================================================================
// Index Handler
// ============================================================================

pub async fn index() -> Html<String> {
    Html(base_html("Blank.page", &render_landing()))
}

// ============================================================================
// Health Check
// ============================================================================

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp(),
    }))
}

// ============================================================================
// Search Handler
// ============================================================================

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /api/search?q= - Shared notes whose title or content contains `q`.
pub async fn search(
    Query(query): Query<SearchQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let q = query.q.unwrap_or_default();
    if q.is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "Query parameter required");
    }

    let notes = live_notes(&state);
    let results = search_shared_notes(&notes, &q);
    Json(serde_json::json!({ "notes": results })).into_response()
}

// ============================================================================
// Stats Handler
// ============================================================================

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<ShareStats> {
    let notes = live_notes(&state);
    Json(ShareStats {
        total_notes: notes.len(),
        total_words: notes.iter().map(|n| DocumentStats::of(&n.content).words).sum(),
    })
}

// ============================================================================
// Download Handler
// ============================================================================

/// Attachment filename stem: path separators and colons become `-`.
pub fn download_filename(title: &str) -> String {
    let name = if title.is_empty() || title == UNTITLED {
        "note"
    } else {
        title
    };
    name.replace(['/', '\\', ':'], "-")
}

/// GET /api/notes/{id}/download/{format} - A shared note as a txt or md attachment.
pub async fn download_note(
    Path((id, format)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let content_type = match format.as_str() {
        "txt" => "text/plain",
        "md" => "text/markdown",
        _ => return json_error(StatusCode::BAD_REQUEST, "Invalid format"),
    };

    let note = match lookup_shared(&state.db, &id, Utc::now()) {
        Lookup::Found(n) => n,
        Lookup::Expired | Lookup::NotFound => {
            return json_error(StatusCode::NOT_FOUND, "Note not found")
        }
    };

    let disposition = format!(
        "attachment; filename=\"{}.{}\"",
        download_filename(&note.title),
        format
    );

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        note.content,
    )
        .into_response()
}
