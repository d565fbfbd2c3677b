//! SQLite-backed song store implementation.

use super::schema;
use super::trait_def::{SongStore, StorageError};
use crate::catalog::SongRecord;
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

const SELECT_FIELDS: &str = "Path, Size, Duration, Name, Author, Album, Year, Genres";

/// SQLite-backed song catalog.
///
/// A single write connection behind a mutex; SQLite serializes concurrent
/// writers on its own, no further coordination is layered on top.
#[derive(Clone)]
pub struct SqliteSongStore {
    conn: Arc<Mutex<Connection>>,
}

type RawRow = (String, i64, i64, Option<String>, Option<String>, Option<String>, Option<String>, Option<String>);

fn read_row(row: &rusqlite::Row) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn into_record(raw: RawRow) -> Result<SongRecord, StorageError> {
    let (path, size, duration, name, author, album, year, genres) = raw;
    Ok(SongRecord::new(
        path,
        size,
        duration,
        name.unwrap_or_default(),
        author.unwrap_or_default(),
        album.unwrap_or_default(),
        year.unwrap_or_default(),
        genres.unwrap_or_default(),
    )?)
}

impl SqliteSongStore {
    /// Open (creating if needed) the catalog database at `db_path`.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, StorageError> {
        let conn = Connection::open_with_flags(
            db_path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let store = Self::with_connection(conn)?;
        info!(
            "Opened song catalog at {:?}: {} songs",
            db_path.as_ref(),
            store.songs_count()?
        );
        Ok(store)
    }

    /// In-memory catalog, used by tests and the in-process server tests.
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        schema::create(&conn)?;
        Ok(SqliteSongStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

impl SongStore for SqliteSongStore {
    fn create_song(&self, song: &SongRecord) -> Result<usize, StorageError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "INSERT INTO Songs (Path, Size, Duration, Name, Author, Album, Year, Genres)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        let affected = stmt.execute(params![
            song.path(),
            song.size(),
            song.duration(),
            song.name(),
            song.author(),
            song.album(),
            song.year(),
            song.genres(),
        ])?;
        Ok(affected)
    }

    fn get_song(&self, name: &str) -> Result<Option<SongRecord>, StorageError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {SELECT_FIELDS} FROM Songs WHERE Name = ?1 ORDER BY Id LIMIT 1"
        ))?;
        match stmt.query_row(params![name], read_row) {
            Ok(raw) => Ok(Some(into_record(raw)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn get_all_songs(&self) -> Result<Vec<SongRecord>, StorageError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare_cached(&format!("SELECT {SELECT_FIELDS} FROM Songs ORDER BY Id"))?;
        let raw_rows = stmt
            .query_map([], read_row)?
            .collect::<Result<Vec<RawRow>, _>>()?;
        raw_rows.into_iter().map(into_record).collect()
    }

    fn update_song(&self, song: &SongRecord) -> Result<usize, StorageError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "UPDATE Songs SET Path = ?1, Size = ?2, Duration = ?3, Author = ?4,
                    Album = ?5, Year = ?6, Genres = ?7 WHERE Name = ?8",
        )?;
        let affected = stmt.execute(params![
            song.path(),
            song.size(),
            song.duration(),
            song.author(),
            song.album(),
            song.year(),
            song.genres(),
            song.name(),
        ])?;
        Ok(affected)
    }

    fn delete_song(&self, path: &str) -> Result<usize, StorageError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached("DELETE FROM Songs WHERE Path = ?1")?;
        let affected = stmt.execute(params![path])?;
        Ok(affected)
    }

    fn clear(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().unwrap();
        schema::drop(&conn)?;
        schema::create(&conn)?;
        Ok(())
    }

    fn songs_count(&self) -> Result<usize, StorageError> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM Songs", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn song(path: &str, name: &str) -> SongRecord {
        SongRecord::new(path, 100, 180, name, "Author", "Album", "2020", "Pop").unwrap()
    }

    #[test]
    fn create_then_get_returns_equal_record() {
        let store = SqliteSongStore::in_memory().unwrap();
        let record = song(r"C:\a.mp3", "X");

        assert_eq!(store.create_song(&record).unwrap(), 1);
        let fetched = store.get_song("X").unwrap().unwrap();
        assert_eq!(fetched, record);
    }

    #[test]
    fn get_song_returns_first_match_in_insertion_order() {
        let store = SqliteSongStore::in_memory().unwrap();
        store.create_song(&song(r"C:\first.mp3", "X")).unwrap();
        store.create_song(&song(r"C:\second.mp3", "X")).unwrap();

        let fetched = store.get_song("X").unwrap().unwrap();
        assert_eq!(fetched.path(), r"C:\first.mp3");
    }

    #[test]
    fn name_match_is_case_sensitive() {
        let store = SqliteSongStore::in_memory().unwrap();
        store.create_song(&song(r"C:\a.mp3", "Song")).unwrap();
        assert!(store.get_song("song").unwrap().is_none());
    }

    #[test]
    fn duplicate_names_produce_duplicate_rows() {
        let store = SqliteSongStore::in_memory().unwrap();
        let record = song(r"C:\a.mp3", "X");
        store.create_song(&record).unwrap();
        store.create_song(&record).unwrap();
        assert_eq!(store.songs_count().unwrap(), 2);
    }

    #[test]
    fn get_all_returns_rows_in_insertion_order() {
        let store = SqliteSongStore::in_memory().unwrap();
        store.create_song(&song(r"C:\a.mp3", "A")).unwrap();
        store.create_song(&song(r"C:\b.mp3", "B")).unwrap();
        store.create_song(&song(r"C:\c.mp3", "C")).unwrap();

        let names: Vec<String> = store
            .get_all_songs()
            .unwrap()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn update_overwrites_all_rows_matching_name() {
        let store = SqliteSongStore::in_memory().unwrap();
        store.create_song(&song(r"C:\a.mp3", "X")).unwrap();
        store.create_song(&song(r"C:\b.mp3", "X")).unwrap();

        let updated =
            SongRecord::new(r"C:\new.mp3", 999, 60, "X", "New", "NewAlbum", "2021", "Rock")
                .unwrap();
        assert_eq!(store.update_song(&updated).unwrap(), 2);

        for fetched in store.get_all_songs().unwrap() {
            assert_eq!(fetched.path(), r"C:\new.mp3");
            assert_eq!(fetched.author(), "New");
            assert_eq!(fetched.name(), "X");
        }
    }

    #[test]
    fn update_on_nonexistent_name_affects_nothing() {
        let store = SqliteSongStore::in_memory().unwrap();
        store.create_song(&song(r"C:\a.mp3", "X")).unwrap();

        let other = song(r"C:\b.mp3", "missing");
        assert_eq!(store.update_song(&other).unwrap(), 0);

        let unchanged = store.get_song("X").unwrap().unwrap();
        assert_eq!(unchanged.path(), r"C:\a.mp3");
    }

    #[test]
    fn delete_by_path_removes_matching_rows() {
        let store = SqliteSongStore::in_memory().unwrap();
        store.create_song(&song(r"C:\a.mp3", "X")).unwrap();
        store.create_song(&song(r"C:\b.mp3", "Y")).unwrap();

        assert_eq!(store.delete_song(r"C:\a.mp3").unwrap(), 1);
        assert_eq!(store.songs_count().unwrap(), 1);
        assert!(store.get_song("X").unwrap().is_none());
    }

    #[test]
    fn delete_on_nonexistent_path_affects_nothing() {
        let store = SqliteSongStore::in_memory().unwrap();
        store.create_song(&song(r"C:\a.mp3", "X")).unwrap();
        assert_eq!(store.delete_song(r"C:\missing.mp3").unwrap(), 0);
        assert_eq!(store.songs_count().unwrap(), 1);
    }

    #[test]
    fn clear_empties_the_catalog() {
        let store = SqliteSongStore::in_memory().unwrap();
        store.create_song(&song(r"C:\a.mp3", "X")).unwrap();
        store.clear().unwrap();
        assert_eq!(store.songs_count().unwrap(), 0);
    }

    #[test]
    fn persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("songs.db");

        {
            let store = SqliteSongStore::new(&db_path).unwrap();
            store.create_song(&song(r"C:\a.mp3", "X")).unwrap();
        }

        let store = SqliteSongStore::new(&db_path).unwrap();
        assert_eq!(store.songs_count().unwrap(), 1);
        assert!(store.get_song("X").unwrap().is_some());
    }
}
