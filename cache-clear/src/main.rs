use anyhow::{Context, Result};
use clap::Parser;
use dashcache::planes::control::browser::CLEAR_CACHE_PAGE;
use dashcache::planes::control::{
    BrowserCacheArtifacts, DEFAULT_INDEXED_DB_NAME, MaintenanceOperations,
};
use dashcache::{CacheOperationsService, SledCacheStore};
use shared::config::{CACHE_DB_FILE, Config};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Wipe every cache layer of the dashboard: the backend store, plus the
/// files an operator opens in a browser to clear client-side caches.
#[derive(Debug, Parser)]
#[command(name = "cache-clear", version)]
struct Cli {
    /// Directory holding cache.sled (defaults to DASHCACHE_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Frontend public directory that receives clear-cache.html
    #[arg(long, default_value = "frontend/public")]
    public_dir: PathBuf,

    /// Directory that receives the IndexedDB clearing script
    #[arg(long, default_value = ".")]
    instructions_dir: PathBuf,

    /// IndexedDB database used by the frontend
    #[arg(long, default_value = DEFAULT_INDEXED_DB_NAME)]
    indexed_db_name: String,

    /// Do not write the browser cache clearing files
    #[arg(long)]
    skip_browser: bool,

    /// Do not clear the backend store
    #[arg(long)]
    skip_backend: bool,
}

impl Cli {
    fn cache_db_path(&self, config: &Config) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.join(CACHE_DB_FILE),
            None => config.cache_db_path(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if dotenv.is_ok() {
        info!("Loaded environment variables from .env file");
    }

    let cli = Cli::parse();
    let config = Config::from_env();

    println!("Starting dashboard cache clearer");

    if !cli.skip_browser {
        let artifacts = BrowserCacheArtifacts::new(&cli.indexed_db_name);

        let page = artifacts
            .write_clear_cache_page(&cli.public_dir)
            .context("writing the service worker cache clearer")?;
        println!("Created cache clearer at: {}", page.display());

        let script = artifacts
            .write_indexed_db_script(&cli.instructions_dir)
            .context("writing the IndexedDB clearing script")?;
        println!(
            "Created IndexedDB clearing instructions at: {}",
            script.display()
        );
    }

    if !cli.skip_backend {
        let removed = clear_backend(&cli.cache_db_path(&config)).await?;
        println!("Cleared {} cached items from the backend store", removed);
    }

    println!("Cache clearing process completed");
    if !cli.skip_browser {
        println!("Next steps:");
        println!(
            "- Open {} in your browser",
            cli.public_dir.join(CLEAR_CACHE_PAGE).display()
        );
        println!("- Run the IndexedDB clearing script in the browser console");
    }

    Ok(())
}

/// Open the store, delete every entry and flush before returning.
/// The server must not be running: sled holds an exclusive lock on the database.
async fn clear_backend(db_path: &Path) -> Result<u64> {
    info!("Clearing backend cache at {}", db_path.display());

    let store = SledCacheStore::open(db_path).with_context(|| {
        format!(
            "opening {} (stop the server first, or use DELETE /api/admin/cache)",
            db_path.display()
        )
    })?;
    let service = CacheOperationsService::new(Arc::new(store));

    let removed = service.clear_all().await.context("clearing the cache")?;
    service.close().await.context("flushing the cache store")?;

    Ok(removed)
}
