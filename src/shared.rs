//! Shared notes - public snapshots of a note behind an unguessable link.
//!
//! A shared note is a copy of a note's title and content taken at share time.
//! It lives in sled until it expires; expired records are answered with 410
//! and purged by a periodic cleanup task.

use crate::error::{CreateShareError, StorageError};
use crate::handlers::json_error;
use crate::models::{ShareRequest, ShareResponse, SharedNote};
use crate::templates::{render_expired, render_not_found, render_shared_note};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

const SHARED_TREE: &str = "shared:notes";

/// Interval between expiry sweeps.
pub const CLEANUP_INTERVAL_HOURS: u64 = 6;

// ============================================================================
// Sled helpers
// ============================================================================

fn shared_tree(db: &sled::Db) -> sled::Result<sled::Tree> {
    db.open_tree(SHARED_TREE)
}

pub fn save_shared(db: &sled::Db, note: &SharedNote) -> Result<(), StorageError> {
    let tree = shared_tree(db)?;
    let json = serde_json::to_vec(note)?;
    tree.insert(note.id.as_bytes(), json)?;
    Ok(())
}

pub fn load_shared(db: &sled::Db, id: &str) -> Option<SharedNote> {
    let tree = shared_tree(db).ok()?;
    tree.get(id.as_bytes())
        .ok()
        .flatten()
        .and_then(|v| serde_json::from_slice(&v).ok())
}

pub fn load_all_shared(db: &sled::Db) -> Vec<SharedNote> {
    let tree = match shared_tree(db) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Error opening shared notes: {}", e);
            return Vec::new();
        }
    };

    tree.iter()
        .filter_map(|entry| entry.ok())
        .filter_map(|(_, v)| serde_json::from_slice::<SharedNote>(&v).ok())
        .collect()
}

fn generate_token() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let bytes: [u8; 16] = rng.gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Share ids are 32 lowercase hex characters.
pub fn is_valid_share_id(id: &str) -> bool {
    id.len() == 32 && id.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

// ============================================================================
// Sharing and expiry
// ============================================================================

/// Expiry time for a share made at `now`. `hours <= 0` never expires; hours
/// that cannot be represented as a timestamp are rejected.
pub fn expiry_time(
    now: DateTime<Utc>,
    hours: i64,
) -> Result<Option<DateTime<Utc>>, CreateShareError> {
    if hours <= 0 {
        return Ok(None);
    }
    Duration::try_hours(hours)
        .and_then(|delta| now.checked_add_signed(delta))
        .map(Some)
        .ok_or(CreateShareError::InvalidExpiry(hours))
}

/// Snapshot a note for sharing.
pub fn create_shared(
    db: &sled::Db,
    request: &ShareRequest,
    now: DateTime<Utc>,
) -> Result<SharedNote, CreateShareError> {
    let expires_at = expiry_time(now, request.expiry_hours)?;

    let note = SharedNote {
        id: generate_token(),
        title: request.title.clone(),
        content: request.content.clone(),
        created_at: now,
        expires_at,
    };
    save_shared(db, &note)?;
    Ok(note)
}

pub enum Lookup {
    Found(SharedNote),
    Expired,
    NotFound,
}

pub fn lookup_shared(db: &sled::Db, id: &str, now: DateTime<Utc>) -> Lookup {
    if !is_valid_share_id(id) {
        return Lookup::NotFound;
    }
    match load_shared(db, id) {
        Some(note) if note.is_expired(now) => Lookup::Expired,
        Some(note) => Lookup::Found(note),
        None => Lookup::NotFound,
    }
}

/// Delete every expired shared note. Returns how many were removed.
pub fn cleanup_expired(db: &sled::Db, now: DateTime<Utc>) -> usize {
    let tree = match shared_tree(db) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Error finding expired shared notes: {}", e);
            return 0;
        }
    };

    let mut removed = 0;
    for note in load_all_shared(db).into_iter().filter(|n| n.is_expired(now)) {
        match tree.remove(note.id.as_bytes()) {
            Ok(_) => removed += 1,
            Err(e) => log::error!("Error deleting shared note {}: {}", note.id, e),
        }
    }

    if removed > 0 {
        log::info!("Cleaned up {} expired shared notes", removed);
    }
    removed
}

/// Run `cleanup_expired` every `CLEANUP_INTERVAL_HOURS`.
pub async fn start_cleanup_routine(db: sled::Db) {
    let period = std::time::Duration::from_secs(CLEANUP_INTERVAL_HOURS * 3600);
    let mut ticker = tokio::time::interval(period);
    // The first tick completes immediately; startup already ran a sweep.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let db = db.clone();
        if let Err(e) =
            tokio::task::spawn_blocking(move || cleanup_expired(&db, Utc::now())).await
        {
            log::error!("Cleanup task failed: {}", e);
        }
    }
}

// ============================================================================
// REST Handlers
// ============================================================================

/// Public address of a share, from the forwarded scheme and the Host header.
pub fn share_url(headers: &HeaderMap, share_id: &str) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string()
    };
    let host = header("host");
    let proto = header("x-forwarded-proto");

    if proto.starts_with("http") {
        format!("{}://{}/shared/{}", proto, host, share_id)
    } else {
        format!("http://{}/shared/{}", host, share_id)
    }
}

/// POST /api/share - Snapshot a note and return its public link.
pub async fn create_share(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ShareRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(_) => return json_error(StatusCode::BAD_REQUEST, "Invalid request"),
    };

    let note = match create_shared(&state.db, &request, Utc::now()) {
        Ok(n) => n,
        Err(CreateShareError::InvalidExpiry(hours)) => {
            log::warn!("Rejected share with expiry of {} hours", hours);
            return json_error(StatusCode::BAD_REQUEST, "Invalid request");
        }
        Err(e) => {
            log::error!("Failed to create share link: {}", e);
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create share link");
        }
    };

    log::info!("Created shared note {} (expires: {:?})", note.id, note.expires_at);

    Json(ShareResponse {
        share_url: share_url(&headers, &note.id),
        share_id: note.id,
        expires_at: note.expires_at,
    })
    .into_response()
}

/// GET /shared/{id} - Public HTML page for a shared note.
pub async fn shared_note_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match lookup_shared(&state.db, &id, Utc::now()) {
        Lookup::Found(note) => Html(render_shared_note(&note)).into_response(),
        Lookup::Expired => (StatusCode::GONE, Html(render_expired())).into_response(),
        Lookup::NotFound => (StatusCode::NOT_FOUND, Html(render_not_found())).into_response(),
    }
}

/// GET /api/shared/{id} - A shared note as JSON.
pub async fn get_shared_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match lookup_shared(&state.db, &id, Utc::now()) {
        Lookup::Found(note) => Json(note).into_response(),
        Lookup::Expired => json_error(StatusCode::GONE, "Note expired"),
        Lookup::NotFound => json_error(StatusCode::NOT_FOUND, "Note not found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn temp_state() -> Arc<AppState> {
        let db = sled::Config::new().temporary(true).open().unwrap();
        Arc::new(AppState::with_db(db, std::env::temp_dir()))
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request(hours: i64) -> ShareRequest {
        ShareRequest {
            title: "Shared".into(),
            content: "# Shared\n\nbody".into(),
            expiry_hours: hours,
        }
    }

    #[test]
    fn test_create_and_lookup() {
        let state = temp_state();
        let now = Utc::now();
        let note = create_shared(&state.db, &request(24), now).unwrap();

        assert!(is_valid_share_id(&note.id));
        assert_eq!(note.expires_at, Some(now + Duration::hours(24)));
        match lookup_shared(&state.db, &note.id, now) {
            Lookup::Found(found) => assert_eq!(found, note),
            _ => panic!("expected shared note"),
        }
    }

    #[test]
    fn test_zero_expiry_never_expires() {
        let state = temp_state();
        let now = Utc::now();
        let note = create_shared(&state.db, &request(0), now).unwrap();
        assert_eq!(note.expires_at, None);
        assert!(matches!(
            lookup_shared(&state.db, &note.id, now + Duration::days(3650)),
            Lookup::Found(_)
        ));
    }

    #[test]
    fn test_expired_and_unknown_lookups() {
        let state = temp_state();
        let now = Utc::now();
        let note = create_shared(&state.db, &request(1), now).unwrap();

        assert!(matches!(
            lookup_shared(&state.db, &note.id, now + Duration::hours(2)),
            Lookup::Expired
        ));
        assert!(matches!(
            lookup_shared(&state.db, "not-a-share-id", now),
            Lookup::NotFound
        ));
        assert!(matches!(
            lookup_shared(&state.db, &"0".repeat(32), now),
            Lookup::NotFound
        ));
    }

    #[test]
    fn test_cleanup_removes_only_expired() {
        let state = temp_state();
        let now = Utc::now();
        let short = create_shared(&state.db, &request(1), now).unwrap();
        let long = create_shared(&state.db, &request(720), now).unwrap();
        let forever = create_shared(&state.db, &request(0), now).unwrap();

        assert_eq!(cleanup_expired(&state.db, now + Duration::hours(2)), 1);
        assert!(load_shared(&state.db, &short.id).is_none());
        assert!(load_shared(&state.db, &long.id).is_some());
        assert!(load_shared(&state.db, &forever.id).is_some());
        assert_eq!(cleanup_expired(&state.db, now + Duration::hours(2)), 0);
    }

    #[test]
    fn test_share_url_prefers_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("blank.example.com"));
        assert_eq!(share_url(&headers, "abc"), "http://blank.example.com/shared/abc");

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(share_url(&headers, "abc"), "https://blank.example.com/shared/abc");
    }

    #[tokio::test]
    async fn test_create_share_handler() {
        let state = temp_state();
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("localhost:8080"));

        let response = create_share(State(state.clone()), headers, Ok(Json(request(168)))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(load_all_shared(&state.db).len(), 1);
    }

    #[tokio::test]
    async fn test_page_status_codes() {
        let state = temp_state();
        let now = Utc::now();
        let live = create_shared(&state.db, &request(0), now).unwrap();
        let mut stale = create_shared(&state.db, &request(1), now).unwrap();
        stale.expires_at = Some(now - Duration::hours(1));
        save_shared(&state.db, &stale).unwrap();

        let ok = shared_note_page(State(state.clone()), Path(live.id.clone())).await;
        assert_eq!(ok.status(), StatusCode::OK);

        let gone = shared_note_page(State(state.clone()), Path(stale.id.clone())).await;
        assert_eq!(gone.status(), StatusCode::GONE);

        let missing = get_shared_note(State(state.clone()), Path("nope".into())).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_expiry_time_bounds() {
        let now = Utc::now();
        assert_eq!(expiry_time(now, 0).unwrap(), None);
        assert_eq!(expiry_time(now, -5).unwrap(), None);
        assert_eq!(expiry_time(now, 720).unwrap(), Some(now + Duration::hours(720)));
        assert!(matches!(
            expiry_time(now, i64::MAX),
            Err(CreateShareError::InvalidExpiry(i64::MAX))
        ));
        assert!(matches!(
            expiry_time(now, 1_000_000_000_000),
            Err(CreateShareError::InvalidExpiry(_))
        ));
    }

    #[tokio::test]
    async fn test_out_of_range_expiry_is_bad_request() {
        let state = temp_state();
        for hours in [i64::MAX, 1_000_000_000_000] {
            let response =
                create_share(State(state.clone()), HeaderMap::new(), Ok(Json(request(hours)))).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json_body(response).await["error"], "Invalid request");
        }
        assert!(load_all_shared(&state.db).is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let state = temp_state();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, crate::router(state)).await.unwrap();
        });

        let response = reqwest::Client::new()
            .post(format!("http://{}/api/share", addr))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Invalid request");
    }

    #[tokio::test]
    async fn test_shared_note_json() {
        let state = temp_state();
        let now = Utc::now();
        let live = create_shared(&state.db, &request(24), now).unwrap();
        let mut stale = create_shared(&state.db, &request(1), now).unwrap();
        stale.expires_at = Some(now - Duration::hours(1));
        save_shared(&state.db, &stale).unwrap();

        let found = get_shared_note(State(state.clone()), Path(live.id.clone())).await;
        assert_eq!(found.status(), StatusCode::OK);
        let body = json_body(found).await;
        assert_eq!(body["id"], live.id.as_str());
        assert_eq!(body["title"], "Shared");
        assert!(body["expiresAt"].is_string());

        let gone = get_shared_note(State(state), Path(stale.id.clone())).await;
        assert_eq!(gone.status(), StatusCode::GONE);
        assert_eq!(json_body(gone).await["error"], "Note expired");
    }
}
