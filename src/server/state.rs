use axum::extract::FromRef;

use crate::catalog_store::SongStore;
use crate::ingestion::IngestionManager;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type SharedSongStore = Arc<dyn SongStore>;
pub type SharedIngestionManager = Arc<IngestionManager>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub store: SharedSongStore,
    pub ingestion: SharedIngestionManager,
    pub hash: String,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        store: SharedSongStore,
        ingestion: SharedIngestionManager,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            store,
            ingestion,
            hash: env!("GIT_HASH").to_string(),
        }
    }
}

impl FromRef<ServerState> for SharedSongStore {
    fn from_ref(input: &ServerState) -> Self {
        input.store.clone()
    }
}

impl FromRef<ServerState> for SharedIngestionManager {
    fn from_ref(input: &ServerState) -> Self {
        input.ingestion.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
