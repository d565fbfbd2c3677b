//! Batch ingestion of audio files into the catalog.

use super::scanner;
use super::tag_reader::{ExtractionError, TagReader};
use crate::catalog::{SongRecord, ValidationError};
use crate::catalog_store::{SongStore, StorageError};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while ingesting a single file.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One file that failed during a batch ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct IngestFailure {
    pub path: String,
    pub error: String,
}

/// Outcome of a batch ingestion. Failures never abort the batch; every
/// remaining file is still processed.
#[derive(Debug, Default, Serialize)]
pub struct IngestReport {
    pub ingested: usize,
    pub failures: Vec<IngestFailure>,
}

/// Reads tags from audio files and inserts the resulting records into the
/// store. Files in a batch are independent, so tag reading runs in parallel;
/// the store's own locking serializes the inserts.
pub struct IngestionManager {
    store: Arc<dyn SongStore>,
    tag_reader: Arc<dyn TagReader>,
}

impl IngestionManager {
    pub fn new(store: Arc<dyn SongStore>, tag_reader: Arc<dyn TagReader>) -> Self {
        Self { store, tag_reader }
    }

    /// Extract metadata from one file and insert it into the catalog.
    pub fn ingest_file(&self, path: &Path) -> Result<SongRecord, IngestError> {
        let path = std::fs::canonicalize(path)?;
        let size = std::fs::metadata(&path)?.len() as i64;
        let tags = self.tag_reader.read_tags(&path)?;

        let record = SongRecord::new(
            path.to_string_lossy(),
            size,
            tags.duration_sec,
            tags.title.unwrap_or_default(),
            tags.artist.unwrap_or_default(),
            tags.album.unwrap_or_default(),
            tags.year.unwrap_or_default(),
            tags.genres.join(", "),
        )?;
        self.store.create_song(&record)?;
        Ok(record)
    }

    /// Ingest many files, isolating per-file failures.
    pub fn ingest_batch(&self, paths: &[PathBuf]) -> IngestReport {
        let results: Vec<(PathBuf, Result<SongRecord, IngestError>)> = paths
            .par_iter()
            .map(|path| (path.clone(), self.ingest_file(path)))
            .collect();

        let mut report = IngestReport::default();
        for (path, result) in results {
            match result {
                Ok(_) => report.ingested += 1,
                Err(err) => {
                    warn!("Failed to ingest {:?}: {}", path, err);
                    report.failures.push(IngestFailure {
                        path: path.to_string_lossy().into_owned(),
                        error: err.to_string(),
                    });
                }
            }
        }
        info!(
            "Ingested {} files, {} failures",
            report.ingested,
            report.failures.len()
        );
        report
    }

    /// Scan a directory for supported audio files and ingest them all.
    pub fn ingest_directory(
        &self,
        dir: &Path,
        recursive: bool,
    ) -> Result<IngestReport, walkdir::Error> {
        let files = scanner::scan_directory(dir, recursive)?;
        Ok(self.ingest_batch(&files))
    }
}
