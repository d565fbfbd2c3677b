mod schema;
mod store;
mod trait_def;

pub use store::SqliteSongStore;
pub use trait_def::{SongStore, StorageError};
