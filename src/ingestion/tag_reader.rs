//! Tag extraction from audio files.

use id3::{Tag, TagLike};
use std::path::Path;
use thiserror::Error;

/// Errors raised while extracting metadata from a single file. Never fatal
/// for a batch: the failing file is reported and the batch continues.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("tag error: {0}")]
    Tag(#[from] id3::Error),

    #[error("could not determine duration: {0}")]
    Duration(#[from] mp3_duration::MP3DurationError),
}

/// Metadata extracted from an audio file's tags.
#[derive(Debug, Clone, Default)]
pub struct SongTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub genres: Vec<String>,
    pub duration_sec: i64,
}

/// Tag-reading capability, abstracted so ingestion can be tested without
/// real audio files.
pub trait TagReader: Send + Sync {
    fn read_tags(&self, path: &Path) -> Result<SongTags, ExtractionError>;
}

/// ID3 tag reader for mp3 files. Duration comes from frame analysis rather
/// than the tag, since TLEN is rarely present.
pub struct Id3TagReader;

impl TagReader for Id3TagReader {
    fn read_tags(&self, path: &Path) -> Result<SongTags, ExtractionError> {
        let tag = match Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(id3::Error {
                kind: id3::ErrorKind::NoTag,
                ..
            }) => Tag::new(),
            Err(e) => return Err(e.into()),
        };

        let duration_sec = mp3_duration::from_path(path)?.as_secs() as i64;

        // TCON may hold several null-separated genre entries.
        let genres = tag
            .genre_parsed()
            .map(|g| {
                g.split('\0')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(SongTags {
            title: tag.title().map(|s| s.to_string()),
            artist: tag.artist().map(|s| s.to_string()),
            album: tag.album().map(|s| s.to_string()),
            year: tag.year().map(|y| y.to_string()),
            genres,
            duration_sec,
        })
    }
}
