//! The editor controller.
//!
//! `App` owns everything the editor session needs: the note store, the
//! navigation address, the current note id and the UI state. Front ends feed
//! it user events and receive display updates through their `View`.

use crate::error::ShareError;
use crate::export::{export_note, ExportFormat, ExportedFile};
use crate::models::{Note, ShareRequest};
use crate::navigation::Location;
use crate::notes::{generate_note_id, DocumentStats};
use crate::resolver::{resolve, Resolution, WELCOME_CONTENT};
use crate::share_client::ShareLink;
use crate::shortcuts::Shortcut;
use crate::sidebar::{self, SidebarEntry};
use crate::storage::{LocalStorage, THEME_KEY};
use crate::store::NoteStore;
use crate::view::{TitleDisplay, ToastLevel, View};
use crate::view_state::{ShareOutcome, Theme, ViewState};
use chrono::Utc;

pub struct App<S: LocalStorage, V: View> {
    store: NoteStore<S>,
    location: Location,
    current_id: Option<String>,
    view_state: ViewState,
    view: V,
}

impl<S: LocalStorage, V: View> App<S, V> {
    pub fn new(storage: S, location: Location, view: V) -> Self {
        let store = NoteStore::new(storage);
        let theme = match store.storage().get_item(THEME_KEY) {
            Ok(Some(value)) => Theme::parse(&value).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(e) => {
                log::warn!("Could not read theme: {}", e);
                Theme::default()
            }
        };

        Self {
            store,
            location,
            current_id: None,
            view_state: ViewState {
                theme,
                ..ViewState::default()
            },
            view,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn current_note(&self) -> Option<&Note> {
        self.current_id.as_deref().and_then(|id| self.store.get(id))
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn view_state_mut(&mut self) -> &mut ViewState {
        &mut self.view_state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn sidebar(&self) -> Vec<SidebarEntry> {
        sidebar::project(self.store.notes().values(), self.current_id.as_deref())
    }

    pub fn stats(&self) -> DocumentStats {
        self.current_note()
            .map(|note| DocumentStats::of(&note.content))
            .unwrap_or_default()
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Reload the store and pick the current note.
    pub fn load_current_note(&mut self) -> Resolution {
        self.store.load();
        log::debug!("Found {} notes", self.store.len());

        let url_note = self.location.note_id();
        let last_edited = self.store.last_edited();
        let resolution = resolve(self.store.notes(), url_note.as_deref(), last_edited.as_deref());
        log::debug!("Resolved current note: {:?}", resolution);

        match &resolution {
            Resolution::FromUrl(id) => self.select(id, false),
            Resolution::LastEdited(id) | Resolution::MostRecent(id) => self.select(id, true),
            Resolution::Welcome => {
                self.insert_and_select(WELCOME_CONTENT);
            }
        }
        self.refresh_sidebar();
        resolution
    }

    /// Back/forward navigation landed on `location`.
    pub fn navigate(&mut self, location: Location) -> Resolution {
        self.location = location;
        self.load_current_note()
    }

    fn select(&mut self, id: &str, rewrite_url: bool) {
        self.current_id = Some(id.to_string());
        if let Some(note) = self.store.get(id) {
            self.view.load_note(note);
            self.view.update_stats(&DocumentStats::of(&note.content));
            self.view.update_title(&TitleDisplay::for_title(&note.title));
        }
        if rewrite_url {
            self.location.replace_note(id);
        }
    }

    fn insert_and_select(&mut self, content: &str) -> String {
        let id = generate_note_id();
        self.store.insert(Note::new(id.clone(), content, Utc::now()));
        self.store.save();
        self.select(&id, true);
        id
    }

    fn refresh_sidebar(&mut self) {
        let entries = sidebar::project(self.store.notes().values(), self.current_id.as_deref());
        self.view.render_sidebar(&entries);
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// A content change in the editor.
    pub fn handle_input(&mut self, content: &str) {
        let id = match self.current_id.clone() {
            Some(id) => id,
            None => self
                .location
                .note_id()
                .filter(|id| self.store.contains(id))
                .unwrap_or_else(generate_note_id),
        };
        self.current_id = Some(id.clone());

        self.store.upsert(&id, content);
        self.store.save();
        self.store.set_last_edited(&id);

        self.refresh_sidebar();
        self.view.update_stats(&DocumentStats::of(content));
        self.view.update_title(&TitleDisplay::for_content(content));

        if self.location.note_id().as_deref() != Some(id.as_str()) {
            self.location.replace_note(&id);
        }
    }

    /// Text loaded from a file replaces the editor content.
    pub fn import_content(&mut self, content: &str) {
        self.handle_input(content);
    }

    pub fn create_new_note(&mut self) -> String {
        let id = self.insert_and_select("");
        self.refresh_sidebar();
        id
    }

    /// Make `id` current. Unknown ids are ignored.
    pub fn switch_to_note(&mut self, id: &str) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.select(id, true);
        self.refresh_sidebar();
        self.view_state.page_selector_open = false;
        true
    }

    /// Delete `id` after `confirm` agrees. Unknown ids are ignored.
    ///
    /// When the current note is deleted the most recent remaining note becomes
    /// current, or a new empty note if none remain.
    pub fn delete_note<F>(&mut self, id: &str, confirm: F) -> bool
    where
        F: FnOnce(&Note) -> bool,
    {
        let confirmed = self.store.get(id).map(confirm).unwrap_or(false);
        if !confirmed {
            return false;
        }

        self.store.remove(id);
        self.store.save();
        if self.store.last_edited().as_deref() == Some(id) {
            self.store.clear_last_edited();
        }

        if self.current_id.as_deref() == Some(id) {
            let next = self.store.most_recent().map(|note| note.id.clone());
            match next {
                Some(next) => {
                    self.switch_to_note(&next);
                }
                None => {
                    self.create_new_note();
                }
            }
        }

        self.refresh_sidebar();
        true
    }

    pub fn delete_current_note<F>(&mut self, confirm: F) -> bool
    where
        F: FnOnce(&Note) -> bool,
    {
        self.view_state.more_options_open = false;
        match self.current_id.clone() {
            Some(id) => self.delete_note(&id, confirm),
            None => {
                self.view.show_toast("No note selected", ToastLevel::Error);
                false
            }
        }
    }

    // ========================================================================
    // Copy / export
    // ========================================================================

    /// Content to put on the clipboard, if there is any.
    pub fn copy_content(&mut self) -> Option<String> {
        let content = match self.current_note() {
            Some(note) => note.content.clone(),
            None => {
                self.view.show_toast("No note to copy", ToastLevel::Error);
                return None;
            }
        };

        if content.trim().is_empty() {
            self.view.show_toast("Note is empty", ToastLevel::Warning);
            return None;
        }

        self.view
            .show_toast("Note content copied to clipboard", ToastLevel::Info);
        Some(content)
    }

    pub fn current_url(&self) -> String {
        self.location.to_string()
    }

    /// The address of the current note, for the clipboard.
    pub fn copy_url(&mut self) -> String {
        self.view.show_toast("URL copied to clipboard", ToastLevel::Info);
        self.current_url()
    }

    pub fn export_current(&mut self, format: ExportFormat) -> Option<ExportedFile> {
        self.view_state.more_options_open = false;
        match self.current_note() {
            Some(note) => Some(export_note(note, format)),
            None => {
                self.view
                    .show_toast("Please create a note first", ToastLevel::Error);
                None
            }
        }
    }

    // ========================================================================
    // Sharing
    // ========================================================================

    /// Open the share dialog for the current note.
    pub fn open_share(&mut self) -> bool {
        if self.current_note().is_none() {
            self.view
                .show_toast("Please create a note first", ToastLevel::Error);
            return false;
        }
        self.view_state.open_share();
        true
    }

    pub fn close_share(&mut self) {
        self.view_state.close_share();
    }

    /// Request body for sharing the current note. `expiry_hours` is remembered
    /// by the dialog for the result line.
    pub fn share_request(&mut self, expiry_hours: i64) -> Option<ShareRequest> {
        self.view_state.share.expiry_hours = expiry_hours;
        match self.current_note() {
            Some(note) => Some(ShareRequest {
                title: note.title.clone(),
                content: note.content.clone(),
                expiry_hours,
            }),
            None => {
                self.view
                    .show_toast("Please create a note first", ToastLevel::Error);
                None
            }
        }
    }

    /// Deliver a finished share request. Dropped if the dialog was closed.
    pub fn complete_share(&mut self, result: Result<ShareLink, ShareError>) -> Option<ShareOutcome> {
        if !self.view_state.share.open {
            log::debug!("Share dialog closed before the request finished");
            return None;
        }

        let outcome = match result {
            Ok(link) => ShareOutcome::Created {
                share_url: link.url,
                expiry_hours: self.view_state.share.expiry_hours,
            },
            Err(e) => {
                log::error!("Error creating share link: {}", e);
                ShareOutcome::failed()
            }
        };

        self.view.share_result(&outcome);
        self.view_state.share.result = Some(outcome.clone());
        Some(outcome)
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub fn toggle_theme(&mut self) -> Theme {
        self.view_state.theme = self.view_state.theme.toggled();
        let theme = self.view_state.theme;
        if let Err(e) = self.store.storage_mut().set_item(THEME_KEY, theme.as_str()) {
            log::error!("Error saving theme: {}", e);
        }
        theme
    }

    pub fn toggle_page_selector(&mut self) {
        self.view_state.toggle_page_selector();
        if self.view_state.page_selector_open {
            self.refresh_sidebar();
        }
    }

    pub fn open_about(&mut self) {
        self.view_state.open_about();
        self.view.show_about();
    }

    pub fn escape(&mut self) {
        self.view_state.escape();
    }

    /// Apply a keyboard shortcut.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::NewNote => {
                self.create_new_note();
            }
            // Content is saved on every change.
            Shortcut::Save => {}
            Shortcut::ToggleTheme => {
                self.toggle_theme();
            }
            Shortcut::TogglePageSelector => self.toggle_page_selector(),
            Shortcut::Share => {
                self.open_share();
            }
            Shortcut::Escape => self.escape(),
        }
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;
