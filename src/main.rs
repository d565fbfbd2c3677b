use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mptree_catalog_server::catalog_store::{SongStore, SqliteSongStore};
use mptree_catalog_server::ingestion::{Id3TagReader, IngestionManager};
use mptree_catalog_server::server::{run_server, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite song catalog database file.
    #[clap(value_parser = parse_path)]
    pub catalog_db: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Directory of audio files to ingest before serving.
    #[clap(long, value_parser = parse_path)]
    pub scan: Option<PathBuf>,

    /// Recurse into subdirectories when scanning.
    #[clap(long, default_value_t = false)]
    pub recursive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    info!("Opening song catalog at {:?}...", cli_args.catalog_db);
    let store: Arc<dyn SongStore> = Arc::new(
        SqliteSongStore::new(&cli_args.catalog_db).context("Failed to open song catalog")?,
    );

    let ingestion = Arc::new(IngestionManager::new(store.clone(), Arc::new(Id3TagReader)));

    if let Some(scan_dir) = &cli_args.scan {
        info!("Scanning {:?} for audio files...", scan_dir);
        let report = ingestion
            .ingest_directory(scan_dir, cli_args.recursive)
            .with_context(|| format!("Failed to scan {:?}", scan_dir))?;
        info!(
            "Scan complete: {} ingested, {} failed",
            report.ingested,
            report.failures.len()
        );
    }

    let config = ServerConfig {
        requests_logging_level: cli_args.logging_level,
        port: cli_args.port,
    };

    run_server(config, store, ingestion).await
}
