mod manager;
mod scanner;
mod tag_reader;

pub use manager::{IngestError, IngestFailure, IngestReport, IngestionManager};
pub use scanner::{scan_directory, SUPPORTED_AUDIO_EXTENSIONS};
pub use tag_reader::{ExtractionError, Id3TagReader, SongTags, TagReader};
