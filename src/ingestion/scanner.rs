//! Directory scanning for ingestible audio files.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Audio file extensions the tag reader can handle.
pub const SUPPORTED_AUDIO_EXTENSIONS: &[&str] = &["mp3"];

fn is_supported_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .map(|e| SUPPORTED_AUDIO_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or(false)
}

/// Enumerate supported audio files under `dir`. Non-recursive scans only
/// look at direct children. Results are sorted for a stable ingestion order.
pub fn scan_directory(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, walkdir::Error> {
    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).max_depth(max_depth) {
        let entry = entry?;
        if entry.file_type().is_file() && is_supported_audio(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
