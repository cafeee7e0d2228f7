//! Tests for the editor controller.

use super::*;
use crate::models::NoteMap;
use crate::shortcuts::KeyPress;
use crate::sidebar::SidebarEntry;
use crate::storage::{MemoryStorage, LAST_NOTE_KEY, NOTES_KEY};
use chrono::{DateTime, Duration, TimeZone};

// ============================================================================
// Helpers
// ============================================================================

#[derive(Default)]
struct RecordingView {
    loaded: Vec<String>,
    titles: Vec<TitleDisplay>,
    sidebars: Vec<Vec<SidebarEntry>>,
    toasts: Vec<(String, ToastLevel)>,
    shares: Vec<ShareOutcome>,
    abouts: usize,
}

impl View for RecordingView {
    fn load_note(&mut self, note: &Note) {
        self.loaded.push(note.id.clone());
    }

    fn update_title(&mut self, title: &TitleDisplay) {
        self.titles.push(title.clone());
    }

    fn render_sidebar(&mut self, entries: &[SidebarEntry]) {
        self.sidebars.push(entries.to_vec());
    }

    fn show_toast(&mut self, message: &str, level: ToastLevel) {
        self.toasts.push((message.to_string(), level));
    }

    fn share_result(&mut self, outcome: &ShareOutcome) {
        self.shares.push(outcome.clone());
    }

    fn show_about(&mut self) {
        self.abouts += 1;
    }
}

fn t(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes)
}

/// Storage holding notes `(id, content, minutes)` and an optional marker.
fn seeded(notes: &[(&str, &str, i64)], last_edited: Option<&str>) -> MemoryStorage {
    let map: NoteMap = notes
        .iter()
        .map(|(id, content, minutes)| (id.to_string(), Note::new(*id, *content, t(*minutes))))
        .collect();
    let mut storage = MemoryStorage::new();
    storage
        .set_item(NOTES_KEY, &NoteStore::<MemoryStorage>::to_json(&map).unwrap())
        .unwrap();
    if let Some(id) = last_edited {
        storage.set_item(LAST_NOTE_KEY, id).unwrap();
    }
    storage
}

fn app_at(storage: MemoryStorage, url: &str) -> App<MemoryStorage, RecordingView> {
    App::new(storage, Location::parse(url).unwrap(), RecordingView::default())
}

const HOME: &str = "http://localhost:8080/";

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_empty_store_creates_welcome_note() {
    let mut app = app_at(MemoryStorage::new(), HOME);
    assert_eq!(app.load_current_note(), Resolution::Welcome);

    let note = app.current_note().unwrap().clone();
    assert_eq!(note.content, WELCOME_CONTENT);
    assert_eq!(note.title, "Welcome to blank.page");
    assert_eq!(app.store().len(), 1);
    assert_eq!(app.location().note_id().as_deref(), Some(note.id.as_str()));
    assert_eq!(app.view().loaded, vec![note.id.clone()]);

    // Persisted, so a reload finds it instead of creating another.
    let storage = app.store().storage().clone();
    let mut reloaded = app_at(storage, HOME);
    assert_eq!(reloaded.load_current_note(), Resolution::MostRecent(note.id));
}

#[test]
fn test_url_note_wins_and_url_is_kept() {
    let storage = seeded(&[("a", "Alpha", 0), ("b", "Beta", 10)], Some("b"));
    let mut app = app_at(storage, "http://localhost:8080/?note=a");

    assert_eq!(app.load_current_note(), Resolution::FromUrl("a".into()));
    assert_eq!(app.current_id(), Some("a"));
    assert_eq!(app.current_url(), "http://localhost:8080/?note=a");
}

#[test]
fn test_unknown_url_falls_back_to_last_edited() {
    let storage = seeded(&[("a", "Alpha", 0), ("b", "Beta", 10)], Some("a"));
    let mut app = app_at(storage, "http://localhost:8080/?note=missing");

    assert_eq!(app.load_current_note(), Resolution::LastEdited("a".into()));
    assert_eq!(app.location().note_id().as_deref(), Some("a"));
}

#[test]
fn test_stale_marker_falls_back_to_most_recent() {
    let storage = seeded(&[("a", "Alpha", 0), ("b", "Beta", 10)], Some("gone"));
    let mut app = app_at(storage, HOME);

    assert_eq!(app.load_current_note(), Resolution::MostRecent("b".into()));
    assert_eq!(app.location().note_id().as_deref(), Some("b"));
    assert_eq!(app.view().titles.last().unwrap().document_title, "Beta - Blank.page");
}

#[test]
fn test_navigate_reresolves() {
    let storage = seeded(&[("a", "Alpha", 0), ("b", "Beta", 10)], None);
    let mut app = app_at(storage, HOME);
    app.load_current_note();
    assert_eq!(app.current_id(), Some("b"));

    let back = Location::parse("http://localhost:8080/?note=a").unwrap();
    assert_eq!(app.navigate(back), Resolution::FromUrl("a".into()));
    assert_eq!(app.current_id(), Some("a"));
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_input_without_current_note_creates_one() {
    let mut app = app_at(MemoryStorage::new(), "http://localhost:8080/?note=missing");
    app.handle_input("Groceries\nmilk");

    let id = app.current_id().unwrap().to_string();
    assert_ne!(id, "missing");
    assert!(id.starts_with("note_"));
    assert_eq!(app.current_note().unwrap().title, "Groceries");
    assert_eq!(app.location().note_id().as_deref(), Some(id.as_str()));
    assert_eq!(app.store().last_edited().as_deref(), Some(id.as_str()));
    assert_eq!(app.stats().words, 2);
    assert_eq!(app.view().sidebars.last().unwrap().len(), 1);
}

#[test]
fn test_input_adopts_stored_url_note() {
    let storage = seeded(&[("a", "Alpha", 0)], None);
    let mut app = app_at(storage, "http://localhost:8080/?note=a");
    app.handle_input("Alpha revised");

    assert_eq!(app.current_id(), Some("a"));
    assert_eq!(app.store().len(), 1);
    let note = app.store().get("a").unwrap();
    assert_eq!(note.title, "Alpha revised");
    assert_eq!(note.created_at, t(0));
    assert!(note.updated_at > t(0));
}

#[test]
fn test_import_replaces_current_content() {
    let storage = seeded(&[("a", "Alpha", 0)], None);
    let mut app = app_at(storage, HOME);
    app.load_current_note();
    app.import_content("Imported\nfrom disk");

    assert_eq!(app.current_note().unwrap().content, "Imported\nfrom disk");
    assert_eq!(app.view().titles.last().unwrap().title, "Imported");
}

#[test]
fn test_create_new_note_is_untitled() {
    let storage = seeded(&[("a", "Alpha", 0)], None);
    let mut app = app_at(storage, HOME);
    app.load_current_note();

    let id = app.create_new_note();
    let note = app.current_note().unwrap();
    assert_eq!(note.id, id);
    assert_eq!(note.title, "Untitled");
    assert_eq!(note.content, "");
    assert_eq!(app.location().note_id(), Some(id));

    let sidebar = app.view().sidebars.last().unwrap();
    assert_eq!(sidebar.len(), 2);
    assert!(sidebar[0].active);
}

#[test]
fn test_switch_to_note() {
    let storage = seeded(&[("a", "Alpha", 0), ("b", "Beta", 10)], None);
    let mut app = app_at(storage, HOME);
    app.load_current_note();
    app.toggle_page_selector();
    assert!(app.view_state().page_selector_open);

    assert!(!app.switch_to_note("missing"));
    assert_eq!(app.current_id(), Some("b"));

    assert!(app.switch_to_note("a"));
    assert_eq!(app.current_id(), Some("a"));
    assert_eq!(app.location().note_id().as_deref(), Some("a"));
    assert!(!app.view_state().page_selector_open);
}

// ============================================================================
// Deletion
// ============================================================================

#[test]
fn test_delete_current_switches_to_remaining() {
    let storage = seeded(&[("a", "Alpha", 0), ("b", "Beta", 10)], None);
    let mut app = app_at(storage, HOME);
    app.load_current_note();
    assert_eq!(app.current_id(), Some("b"));

    assert!(app.delete_current_note(|_| true));
    assert_eq!(app.current_id(), Some("a"));
    assert_eq!(app.store().len(), 1);
    assert_eq!(app.location().note_id().as_deref(), Some("a"));
}

#[test]
fn test_delete_last_note_creates_fresh_one() {
    let storage = seeded(&[("a", "Alpha", 0)], None);
    let mut app = app_at(storage, HOME);
    app.load_current_note();

    assert!(app.delete_note("a", |_| true));
    let note = app.current_note().unwrap();
    assert_ne!(note.id, "a");
    assert_eq!(note.title, "Untitled");
    assert_eq!(app.store().len(), 1);
}

#[test]
fn test_delete_declined_or_unknown_is_noop() {
    let storage = seeded(&[("a", "Alpha", 0), ("b", "Beta", 10)], None);
    let mut app = app_at(storage, HOME);
    app.load_current_note();

    assert!(!app.delete_note("b", |note| note.title != "Beta"));
    assert!(!app.delete_note("missing", |_| true));
    assert_eq!(app.store().len(), 2);
}

#[test]
fn test_delete_other_note_keeps_current() {
    let storage = seeded(&[("a", "Alpha", 0), ("b", "Beta", 10)], None);
    let mut app = app_at(storage, HOME);
    app.load_current_note();

    assert!(app.delete_note("a", |_| true));
    assert_eq!(app.current_id(), Some("b"));
    assert!(!app.store().contains("a"));
}

// ============================================================================
// Copy / export
// ============================================================================

#[test]
fn test_copy_empty_note_warns() {
    let mut app = app_at(MemoryStorage::new(), HOME);
    assert_eq!(app.copy_content(), None);

    app.create_new_note();
    assert_eq!(app.copy_content(), None);
    assert_eq!(
        app.view().toasts.last(),
        Some(&("Note is empty".to_string(), ToastLevel::Warning))
    );

    app.handle_input("something");
    assert_eq!(app.copy_content().as_deref(), Some("something"));
}

#[test]
fn test_export_closes_menu() {
    let storage = seeded(&[("a", "Road Trip", 0)], None);
    let mut app = app_at(storage, HOME);
    app.load_current_note();
    app.view_state_mut().toggle_more_options();

    let file = app.export_current(ExportFormat::Txt).unwrap();
    assert_eq!(file.filename, "road_trip.txt");
    assert_eq!(file.content, "Road Trip");
    assert!(!app.view_state().more_options_open);
}

// ============================================================================
// Sharing
// ============================================================================

fn link() -> ShareLink {
    ShareLink {
        share_id: "ab".repeat(16),
        url: format!("http://localhost:8080/shared/{}", "ab".repeat(16)),
    }
}

#[test]
fn test_share_without_note_is_refused() {
    let mut app = app_at(MemoryStorage::new(), HOME);
    assert!(!app.open_share());
    assert_eq!(app.share_request(24), None);
    assert_eq!(
        app.view().toasts.last().map(|(m, _)| m.as_str()),
        Some("Please create a note first")
    );
}

#[test]
fn test_share_result_written_while_open() {
    let storage = seeded(&[("a", "Alpha\nbody", 0)], None);
    let mut app = app_at(storage, HOME);
    app.load_current_note();

    assert!(app.open_share());
    let request = app.share_request(24).unwrap();
    assert_eq!(request.title, "Alpha");
    assert_eq!(request.content, "Alpha\nbody");
    assert_eq!(request.expiry_hours, 24);

    let outcome = app.complete_share(Ok(link())).unwrap();
    assert_eq!(
        outcome,
        ShareOutcome::Created {
            share_url: link().url,
            expiry_hours: 24,
        }
    );
    assert_eq!(app.view_state().share.result, Some(outcome));
    assert_eq!(app.view().shares.len(), 1);
}

#[test]
fn test_share_failure_message() {
    let storage = seeded(&[("a", "Alpha", 0)], None);
    let mut app = app_at(storage, HOME);
    app.load_current_note();
    app.open_share();
    app.share_request(0);

    let outcome = app.complete_share(Err(ShareError::Status(500))).unwrap();
    assert_eq!(outcome, ShareOutcome::failed());
}

#[test]
fn test_share_result_dropped_after_close() {
    let storage = seeded(&[("a", "Alpha", 0)], None);
    let mut app = app_at(storage, HOME);
    app.load_current_note();
    app.open_share();
    app.share_request(168);
    app.escape();

    assert_eq!(app.complete_share(Ok(link())), None);
    assert_eq!(app.view_state().share.result, None);
    assert!(app.view().shares.is_empty());
}

// ============================================================================
// UI state
// ============================================================================

#[test]
fn test_theme_persists() {
    let mut app = app_at(MemoryStorage::new(), HOME);
    assert_eq!(app.view_state().theme, Theme::Light);
    assert_eq!(app.toggle_theme(), Theme::Dark);

    let storage = app.store().storage().clone();
    assert_eq!(storage.get_item(THEME_KEY).unwrap().as_deref(), Some("dark"));
    let reopened = App::new(storage, Location::parse(HOME).unwrap(), crate::view::NullView);
    assert_eq!(reopened.view_state().theme, Theme::Dark);
}

#[test]
fn test_shortcuts_drive_controller() {
    let storage = seeded(&[("a", "Alpha", 0)], None);
    let mut app = app_at(storage, HOME);
    app.load_current_note();

    let apply = |app: &mut App<MemoryStorage, RecordingView>, press| {
        if let Some(shortcut) = Shortcut::from_key(press) {
            app.handle_shortcut(shortcut);
        }
    };

    apply(&mut app, KeyPress::ctrl("k"));
    assert!(app.view_state().page_selector_open);

    apply(&mut app, KeyPress::ctrl_shift("S"));
    assert!(app.view_state().share.open);

    apply(&mut app, KeyPress::plain("Escape"));
    assert!(!app.view_state().page_selector_open);
    assert!(!app.view_state().share.open);

    apply(&mut app, KeyPress::ctrl("n"));
    assert_eq!(app.store().len(), 2);
    assert_ne!(app.current_id(), Some("a"));
}

#[test]
fn test_delete_clears_marker_for_deleted_note() {
    let storage = seeded(&[("a", "Alpha", 0), ("b", "Beta", 10)], Some("a"));
    let mut app = app_at(storage, HOME);
    app.load_current_note();
    assert_eq!(app.current_id(), Some("a"));

    assert!(app.delete_note("b", |_| true));
    assert_eq!(app.store().last_edited().as_deref(), Some("a"));

    assert!(app.delete_current_note(|_| true));
    assert_eq!(app.store().last_edited(), None);
}

#[test]
fn test_about_and_share_dialogs() {
    let storage = seeded(&[("a", "Alpha", 0)], None);
    let mut app = app_at(storage, HOME);
    app.load_current_note();

    app.view_state_mut().toggle_more_options();
    app.open_about();
    assert!(app.view_state().about_open);
    assert!(!app.view_state().more_options_open);
    assert_eq!(app.view().abouts, 1);

    assert!(app.open_share());
    app.share_request(24);
    app.close_share();
    assert!(!app.view_state().share.open);
    assert_eq!(app.complete_share(Ok(link())), None);
}
