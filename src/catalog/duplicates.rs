//! Duplicate detection over the full set of cataloged songs.

use super::models::SongRecord;
use std::collections::HashMap;

/// Grouping key for duplicate detection: every field except the path and the
/// author. Two copies of the same file in different locations share this key.
///
/// No case folding or whitespace trimming is applied; records differing only
/// in letter case are treated as distinct. That is a known accuracy
/// limitation of the matching, kept as-is rather than silently changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DuplicateKey {
    size: i64,
    duration: i64,
    name: String,
    album: String,
    year: String,
    genres: String,
}

impl DuplicateKey {
    fn of(record: &SongRecord) -> DuplicateKey {
        DuplicateKey {
            size: record.size(),
            duration: record.duration(),
            name: record.name().to_string(),
            album: record.album().to_string(),
            year: record.year().to_string(),
            genres: record.genres().to_string(),
        }
    }
}

/// Returns every record that belongs to a duplicate group of size > 1,
/// originals included. Deterministic as a set: repeated calls on the same
/// input yield the same records, though not necessarily in the same order.
pub fn find_duplicates(records: &[SongRecord]) -> Vec<SongRecord> {
    let mut groups: HashMap<DuplicateKey, Vec<&SongRecord>> = HashMap::new();
    for record in records {
        groups.entry(DuplicateKey::of(record)).or_default().push(record);
    }

    groups
        .into_values()
        .filter(|group| group.len() > 1)
        .flatten()
        .cloned()
        .collect()
}
