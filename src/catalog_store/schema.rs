//! Schema for the song catalog database.

use rusqlite::Connection;

const CREATE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS Songs (
    Id       INTEGER PRIMARY KEY AUTOINCREMENT,
    Path     TEXT NOT NULL,
    Size     INTEGER NOT NULL,
    Duration INTEGER NOT NULL,
    Name     TEXT,
    Author   TEXT,
    Album    TEXT,
    Year     TEXT,
    Genres   TEXT
);

CREATE INDEX IF NOT EXISTS idx_songs_name ON Songs (Name);
CREATE INDEX IF NOT EXISTS idx_songs_path ON Songs (Path);
";

const DROP_SCHEMA: &str = "
DROP INDEX IF EXISTS idx_songs_name;
DROP INDEX IF EXISTS idx_songs_path;
DROP TABLE IF EXISTS Songs;
";

/// Create the songs table and its indexes if they do not exist yet.
pub fn create(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_SCHEMA)
}

/// Drop the songs table and its indexes.
pub fn drop(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(DROP_SCHEMA)
}
