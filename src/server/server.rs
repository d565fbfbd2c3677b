use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::state::*;
use super::{log_requests, ServerConfig};
use crate::catalog::{find_duplicates, RawSongRecord, SongRecord};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub songs: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct IngestBody {
    pub directory: String,
    #[serde(default)]
    pub recursive: bool,
}

// Storage failures surface as a generic message; SQL details stay in the log.
fn storage_failure(err: impl std::fmt::Display) -> Response {
    error!("Storage error: {}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "storage failure").into_response()
}

async fn home(State(state): State<ServerState>) -> Response {
    let songs = match state.store.songs_count() {
        Ok(count) => count,
        Err(err) => return storage_failure(err),
    };
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        songs,
    };
    Json(stats).into_response()
}

async fn create_song(
    State(store): State<SharedSongStore>,
    payload: Result<Json<RawSongRecord>, JsonRejection>,
) -> Response {
    let Json(raw) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return (StatusCode::BAD_REQUEST, rejection.body_text()).into_response(),
    };
    let song = match SongRecord::try_from(raw) {
        Ok(song) => song,
        Err(err) => return (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    };

    match store.create_song(&song) {
        Ok(affected) if affected > 0 => (StatusCode::CREATED, Json(song)).into_response(),
        Ok(_) => (StatusCode::BAD_REQUEST, "failed to create song").into_response(),
        Err(err) => storage_failure(err),
    }
}

async fn get_all_songs(State(store): State<SharedSongStore>) -> Response {
    match store.get_all_songs() {
        Ok(songs) => Json(songs).into_response(),
        Err(err) => storage_failure(err),
    }
}

async fn get_song_by_name(
    State(store): State<SharedSongStore>,
    Path(name): Path<String>,
) -> Response {
    if name.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "name must not be empty").into_response();
    }
    match store.get_song(&name) {
        Ok(Some(song)) => Json(song).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => storage_failure(err),
    }
}

/// The path segment addresses the request; the update key is the `Name`
/// inside the body, matching the store's update contract.
async fn update_song(
    State(store): State<SharedSongStore>,
    Path(name): Path<String>,
    payload: Result<Json<RawSongRecord>, JsonRejection>,
) -> Response {
    if name.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "name must not be empty").into_response();
    }
    let Json(raw) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return (StatusCode::BAD_REQUEST, rejection.body_text()).into_response(),
    };
    let song = match SongRecord::try_from(raw) {
        Ok(song) => song,
        Err(err) => return (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    };

    match store.update_song(&song) {
        Ok(affected) if affected > 0 => StatusCode::NO_CONTENT.into_response(),
        Ok(_) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => storage_failure(err),
    }
}

async fn delete_song_by_path(
    State(store): State<SharedSongStore>,
    Path(path): Path<String>,
) -> Response {
    if path.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "path must not be empty").into_response();
    }
    match store.delete_song(&path) {
        Ok(affected) if affected > 0 => StatusCode::NO_CONTENT.into_response(),
        Ok(_) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => storage_failure(err),
    }
}

async fn clear_songs(State(store): State<SharedSongStore>) -> Response {
    match store.clear() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => storage_failure(err),
    }
}

async fn get_duplicates(State(store): State<SharedSongStore>) -> Response {
    match store.get_all_songs() {
        Ok(songs) => Json(find_duplicates(&songs)).into_response(),
        Err(err) => storage_failure(err),
    }
}

async fn ingest(
    State(ingestion): State<SharedIngestionManager>,
    payload: Result<Json<IngestBody>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return (StatusCode::BAD_REQUEST, rejection.body_text()).into_response(),
    };

    let dir = PathBuf::from(&body.directory);
    if !dir.is_dir() {
        return (
            StatusCode::BAD_REQUEST,
            format!("not a directory: {}", body.directory),
        )
            .into_response();
    }

    // Tag reading and SQLite inserts are blocking work.
    let result =
        tokio::task::spawn_blocking(move || ingestion.ingest_directory(&dir, body.recursive))
            .await;

    match result {
        Ok(Ok(report)) => Json(report).into_response(),
        Ok(Err(err)) => {
            error!("Ingestion scan failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "ingestion failure").into_response()
        }
        Err(err) => {
            error!("Ingestion task panicked: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "ingestion failure").into_response()
        }
    }
}

pub fn make_app(
    config: ServerConfig,
    store: SharedSongStore,
    ingestion: SharedIngestionManager,
) -> Router {
    let state = ServerState::new(config, store, ingestion);

    // The {key} segment is a song name for GET and PUT and a file path for
    // DELETE; the catalog's two identities share one route position.
    let api_routes: Router<ServerState> = Router::new()
        .route(
            "/songs",
            post(create_song).get(get_all_songs).delete(clear_songs),
        )
        .route(
            "/songs/{key}",
            get(get_song_by_name)
                .put(update_song)
                .delete(delete_song_by_path),
        )
        .route("/duplicates", get(get_duplicates))
        .route("/ingest", post(ingest));

    Router::new()
        .route("/", get(home))
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

pub async fn run_server(
    config: ServerConfig,
    store: SharedSongStore,
    ingestion: SharedIngestionManager,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, store, ingestion);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Ready to serve at port {}!", port);

    Ok(axum::serve(listener, app).await?)
}
