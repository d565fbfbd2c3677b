//! Common test infrastructure
//!
//! Spawns the real axum app on an ephemeral port and provides a thin
//! request client for the song catalog API.

mod client;
mod server;

pub use client::TestClient;
pub use server::TestServer;
