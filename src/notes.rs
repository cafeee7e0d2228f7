//! Note content processing.
//!
//! This module handles the values derived from a note's text:
//! - Identifier generation
//! - Title derivation and display truncation
//! - Word and character statistics
//! - Markdown rendering and HTML escaping for shared pages
//! - Full-text search over shared notes

use crate::models::SharedNote;
use chrono::Utc;
use pulldown_cmark::Parser;
use rand::Rng;

/// Title given to notes whose content has no visible text.
pub const UNTITLED: &str = "Untitled";

/// Application name used in document titles.
pub const APP_NAME: &str = "Blank.page";

const TITLE_MAX_CHARS: usize = 50;
const DISPLAY_TITLE_MAX_CHARS: usize = 20;
const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// ============================================================================
// Identifier Generation
// ============================================================================

/// Generate a note id of the form `note_<unix-millis>_<9 base-36 chars>`.
pub fn generate_note_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("note_{}_{}", Utc::now().timestamp_millis(), suffix)
}

// ============================================================================
// Titles
// ============================================================================

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

/// Derive a note title from the first non-empty line of its content.
pub fn derive_title(content: &str) -> String {
    match content.lines().map(str::trim).find(|line| !line.is_empty()) {
        Some(line) => truncate_chars(line, TITLE_MAX_CHARS),
        None => UNTITLED.to_string(),
    }
}

/// Short form of a title for the navigation bar.
pub fn display_title(title: &str) -> String {
    truncate_chars(title, DISPLAY_TITLE_MAX_CHARS)
}

/// Browser-style document title for a note title.
pub fn document_title(title: &str) -> String {
    if title == UNTITLED {
        APP_NAME.to_string()
    } else {
        format!("{} - {}", title, APP_NAME)
    }
}

// ============================================================================
// Statistics
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    pub words: usize,
    pub chars: usize,
    pub chars_no_spaces: usize,
}

impl DocumentStats {
    pub fn of(content: &str) -> Self {
        Self {
            words: content.split_whitespace().count(),
            chars: content.chars().count(),
            chars_no_spaces: content.chars().filter(|c| !c.is_whitespace()).count(),
        }
    }
}

impl std::fmt::Display for DocumentStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} words, {} chars", self.words, self.chars)
    }
}

// ============================================================================
// Text Escaping
// ============================================================================

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Markdown Rendering
// ============================================================================

pub fn render_markdown(content: &str) -> String {
    let parser = Parser::new(content);
    let mut html_output = String::new();
    pulldown_cmark::html::push_html(&mut html_output, parser);
    // Shared content comes from anyone who can reach the share endpoint
    ammonia::clean(&html_output)
}

// ============================================================================
// Full-Text Search
// ============================================================================

/// Case-insensitive match on title or content, newest first.
pub fn search_shared_notes(notes: &[SharedNote], query: &str) -> Vec<SharedNote> {
    use rayon::prelude::*;

    let query_lower = query.to_lowercase();

    let mut results: Vec<SharedNote> = notes
        .par_iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&query_lower)
                || note.content.to_lowercase().contains(&query_lower)
        })
        .cloned()
        .collect();

    results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    results
}
