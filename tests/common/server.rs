use std::sync::Arc;
use tempfile::TempDir;

use mptree_catalog_server::catalog_store::{SongStore, SqliteSongStore};
use mptree_catalog_server::ingestion::{Id3TagReader, IngestionManager};
use mptree_catalog_server::server::{make_app, RequestsLoggingLevel, ServerConfig};

/// A running catalog server backed by a fresh on-disk database.
pub struct TestServer {
    pub base_url: String,
    _db_dir: TempDir,
}

impl TestServer {
    pub async fn spawn() -> TestServer {
        let db_dir = TempDir::new().unwrap();
        let store: Arc<dyn SongStore> =
            Arc::new(SqliteSongStore::new(db_dir.path().join("songs.db")).unwrap());
        let ingestion = Arc::new(IngestionManager::new(store.clone(), Arc::new(Id3TagReader)));

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };
        let app = make_app(config, store, ingestion);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer {
            base_url: format!("http://{}", addr),
            _db_dir: db_dir,
        }
    }
}
