mod duplicates;
mod models;

pub use duplicates::find_duplicates;
pub use models::{RawSongRecord, SongRecord, ValidationError};
