//! The song record value object and its construction-time validation.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    // Drive-rooted Windows path, the grammar the catalog historically accepted.
    static ref WINDOWS_PATH_REGEX: Regex =
        Regex::new(r#"^[a-zA-Z]:\\(?:[^\\/:*?"<>|\r\n]+\\)*[^\\/:*?"<>|\r\n]*$"#).unwrap();
}

/// Errors raised when constructing a [`SongRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid path: {0:?}")]
    InvalidPath(String),

    #[error("duration must be positive, got {0}")]
    NonPositiveDuration(i64),
}

/// One cataloged audio file's metadata row.
///
/// Fields are private so a record can only exist in a validated state: the
/// path must match the accepted path grammar and the duration must be
/// positive. Everything else accepts an empty string as the "unset" sentinel.
///
/// The JSON document uses PascalCase field names in the fixed order
/// {Path, Size, Duration, Name, Author, Album, Year, Genres}.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "RawSongRecord")]
pub struct SongRecord {
    path: String,
    size: i64,
    duration: i64,
    name: String,
    author: String,
    album: String,
    year: String,
    genres: String,
}

/// The unvalidated wire shape of a song record.
///
/// HTTP handlers deserialize into this and convert explicitly so that a
/// validation failure maps to a 400 rather than a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawSongRecord {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub genres: String,
}

impl TryFrom<RawSongRecord> for SongRecord {
    type Error = ValidationError;

    fn try_from(raw: RawSongRecord) -> Result<Self, Self::Error> {
        SongRecord::new(
            raw.path, raw.size, raw.duration, raw.name, raw.author, raw.album, raw.year,
            raw.genres,
        )
    }
}

fn is_valid_path(path: &str) -> bool {
    // A drive-rooted Windows path or an absolute Unix path. Relative paths
    // and bare names are rejected.
    WINDOWS_PATH_REGEX.is_match(path) || (path.starts_with('/') && !path.contains('\0'))
}

impl SongRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        path: impl Into<String>,
        size: i64,
        duration: i64,
        name: impl Into<String>,
        author: impl Into<String>,
        album: impl Into<String>,
        year: impl Into<String>,
        genres: impl Into<String>,
    ) -> Result<SongRecord, ValidationError> {
        let path = path.into();
        if path.trim().is_empty() || !is_valid_path(&path) {
            return Err(ValidationError::InvalidPath(path));
        }
        if duration <= 0 {
            return Err(ValidationError::NonPositiveDuration(duration));
        }
        Ok(SongRecord {
            path,
            size,
            duration,
            name: name.into(),
            author: author.into(),
            album: album.into(),
            year: year.into(),
            genres: genres.into(),
        })
    }

    /// Path to the audio file. Acts as the delete key.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// File size in bytes.
    pub fn size(&self) -> i64 {
        self.size
    }

    /// Duration in seconds, always positive.
    pub fn duration(&self) -> i64 {
        self.duration
    }

    /// Song title. Acts as the lookup and update key.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn album(&self) -> &str {
        &self.album
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    /// Comma-joined genre list flattened to a single string.
    pub fn genres(&self) -> &str {
        &self.genres
    }
}
