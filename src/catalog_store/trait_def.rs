//! SongStore trait definition.
//!
//! Abstracts the catalog persistence so the server and the ingestion
//! manager can be wired against any backend, and tests can substitute
//! an in-memory store.

use crate::catalog::{SongRecord, ValidationError};
use thiserror::Error;

/// Errors raised by catalog persistence operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A persisted row no longer satisfies the record invariants. Should not
    /// happen since records are validated before insertion.
    #[error("invalid stored row: {0}")]
    InvalidRow(#[from] ValidationError),
}

/// Storage backend for the song catalog.
///
/// The identity split is part of the contract: songs are looked up and
/// updated by `name` and deleted by `path`. Neither key is unique in
/// storage; lookups return the first match and updates and deletes affect
/// every matching row.
pub trait SongStore: Send + Sync {
    /// Insert a new row. No uniqueness check is performed; inserting a
    /// record whose name already exists produces a second row.
    fn create_song(&self, song: &SongRecord) -> Result<usize, StorageError>;

    /// First stored record whose name equals `name`, in insertion order.
    /// The match uses SQLite's default BINARY collation (case-sensitive).
    fn get_song(&self, name: &str) -> Result<Option<SongRecord>, StorageError>;

    /// Every row in insertion (rowid) order.
    fn get_all_songs(&self) -> Result<Vec<SongRecord>, StorageError>;

    /// Overwrite path, size, duration, author, album, year and genres on
    /// every row whose name matches `song.name()`. Returns the affected row
    /// count; 0 means no row matched and is not an error.
    fn update_song(&self, song: &SongRecord) -> Result<usize, StorageError>;

    /// Remove rows matching exactly `path`. Returns the affected row count;
    /// 0 means nothing matched.
    fn delete_song(&self, path: &str) -> Result<usize, StorageError>;

    /// Drop and recreate the songs table.
    fn clear(&self) -> Result<(), StorageError>;

    /// Number of rows in the catalog.
    fn songs_count(&self) -> Result<usize, StorageError>;
}
