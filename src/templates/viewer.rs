//! Shared note viewer and the status pages around it.

use crate::models::SharedNote;
use crate::notes::{html_escape, render_markdown, APP_NAME};

use super::components::base_html;

// ============================================================================
// Shared Note Page
// ============================================================================

pub fn render_shared_note(note: &SharedNote) -> String {
    let expiry_html = match note.expires_at {
        Some(expires) => format!(
            " · expires {}",
            expires.format("%B %-d, %Y %H:%M UTC")
        ),
        None => String::new(),
    };

    let content = format!(
        r#"<div class="note-header">
            <h1>{title}</h1>
            <span class="meta">Shared {date}{expiry}</span>
        </div>
        <div class="note-content">{body}</div>"#,
        title = html_escape(&note.title),
        date = note.created_at.format("%B %-d, %Y"),
        expiry = expiry_html,
        body = render_markdown(&note.content),
    );

    base_html(&format!("{} - {}", note.title, APP_NAME), &content)
}

// ============================================================================
// Status Pages
// ============================================================================

fn notice(heading: &str, message: &str) -> String {
    format!(
        r#"<div class="notice"><h1>{}</h1><p>{}</p></div>"#,
        html_escape(heading),
        html_escape(message)
    )
}

pub fn render_not_found() -> String {
    base_html(
        "Note Not Found",
        &notice(
            "Note Not Found",
            "This shared note does not exist or the link is incorrect.",
        ),
    )
}

pub fn render_expired() -> String {
    base_html(
        "Note Expired",
        &notice("Note Expired", "This shared note is no longer available."),
    )
}

pub fn render_landing() -> String {
    r#"<h1>Blank.page share service</h1>
        <p>Notes are written and kept locally. This service only hosts the
        snapshots you choose to share.</p>
        <ul class="api-list">
            <li><code>POST /api/share</code> create a share link</li>
            <li><code>GET /shared/{id}</code> view a shared note</li>
            <li><code>GET /api/shared/{id}</code> shared note as JSON</li>
            <li><code>GET /api/notes/{id}/download/{txt|md}</code> download a shared note</li>
            <li><code>GET /api/search?q=</code> search shared notes</li>
            <li><code>GET /api/stats</code> totals</li>
        </ul>"#
        .to_string()
}
