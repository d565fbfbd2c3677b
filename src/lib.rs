//! MpTree Catalog Server Library
//!
//! This library exposes the internal modules for testing and reuse.

pub mod catalog;
pub mod catalog_store;
pub mod ingestion;
pub mod server;

// Re-export commonly used types for convenience
pub use catalog::{find_duplicates, SongRecord};
pub use catalog_store::{SongStore, SqliteSongStore};
pub use ingestion::{Id3TagReader, IngestionManager};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
