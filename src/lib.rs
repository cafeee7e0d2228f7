//! blankpage library - the note editor core and the share server.
//!
//! The editor keeps notes in a local storage slot and decides which note to
//! show from the address and the last-edited marker. The share server stores
//! public snapshots of notes behind unguessable links.

use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};

pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod models;
pub mod navigation;
pub mod notes;
pub mod resolver;
pub mod share_client;
pub mod shared;
pub mod shortcuts;
pub mod sidebar;
pub mod storage;
pub mod store;
pub mod templates;
pub mod view;
pub mod view_state;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub db: sled::Db,
    pub static_dir: PathBuf,
}

impl AppState {
    /// Open the server database and purge shares that expired while down.
    pub fn new(config: &config::Config) -> Result<Self, error::StorageError> {
        let db = sled::open(config.server_db_path())?;
        shared::cleanup_expired(&db, chrono::Utc::now());
        Ok(Self::with_db(db, config.static_dir.clone()))
    }

    pub fn with_db(db: sled::Db, static_dir: PathBuf) -> Self {
        Self { db, static_dir }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        // Share routes
        .route("/api/share", post(shared::create_share))
        .route("/api/shared/{id}", get(shared::get_shared_note))
        .route("/shared/{id}", get(shared::shared_note_page))
        .route(
            "/api/notes/{id}/download/{format}",
            get(handlers::download_note),
        )
        // Shared note listing
        .route("/api/search", get(handlers::search))
        .route("/api/stats", get(handlers::stats))
        .nest_service("/static", static_files)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// Re-export commonly used types
pub use app::App;
pub use config::Config;
pub use error::{CreateShareError, Error, ExportError, ShareError, StorageError};
pub use export::{export_filename, export_note, ExportFormat, ExportedFile};
pub use models::{Note, NoteMap, ShareRequest, ShareResponse, SharedNote};
pub use navigation::Location;
pub use notes::{derive_title, generate_note_id, DocumentStats};
pub use resolver::{resolve, Resolution};
pub use share_client::{ShareClient, ShareLink};
pub use shortcuts::{KeyPress, Shortcut};
pub use sidebar::SidebarEntry;
pub use storage::{LocalStorage, MemoryStorage, SledStorage};
pub use store::NoteStore;
pub use view::{NullView, TitleDisplay, ToastLevel, View};
pub use view_state::{ShareOutcome, Theme, ViewState};
