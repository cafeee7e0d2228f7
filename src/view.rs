//! View observer.
//!
//! The controller never touches a rendering surface directly; it reports what
//! changed through this trait. Every method has a no-op default so a front end
//! only implements what it displays.

use crate::models::Note;
use crate::notes::DocumentStats;
use crate::sidebar::SidebarEntry;
use crate::view_state::ShareOutcome;

/// Title values shown for the current note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleDisplay {
    pub title: String,
    /// Truncated title for the navigation bar.
    pub nav_title: String,
    /// Window/document title.
    pub document_title: String,
}

impl TitleDisplay {
    pub fn for_content(content: &str) -> Self {
        Self::for_title(&crate::notes::derive_title(content))
    }

    pub fn for_title(title: &str) -> Self {
        Self {
            title: title.to_string(),
            nav_title: crate::notes::display_title(title),
            document_title: crate::notes::document_title(title),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

pub trait View {
    /// A note was loaded into the editor.
    fn load_note(&mut self, _note: &Note) {}

    fn update_stats(&mut self, _stats: &DocumentStats) {}

    fn update_title(&mut self, _title: &TitleDisplay) {}

    fn render_sidebar(&mut self, _entries: &[SidebarEntry]) {}

    fn show_toast(&mut self, _message: &str, _level: ToastLevel) {}

    /// The share dialog received the result of a share request.
    fn share_result(&mut self, _outcome: &ShareOutcome) {}

    fn show_about(&mut self) {}
}

/// A view that displays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl View for NullView {}
