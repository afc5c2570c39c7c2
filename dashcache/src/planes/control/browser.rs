use shared::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// IndexedDB database the dashboard frontend keeps its local copy in
pub const DEFAULT_INDEXED_DB_NAME: &str = "MDRRMODashboard";

pub const CLEAR_CACHE_PAGE: &str = "clear-cache.html";
pub const INDEXED_DB_SCRIPT: &str = "clear_indexeddb_instructions.js";

const CLEAR_CACHE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Clear Cache</title>
</head>
<body>
    <h1>Clearing Cache...</h1>
    <script>
        if ('serviceWorker' in navigator) {
            navigator.serviceWorker.getRegistrations().then(registrations => {
                registrations.forEach(registration => {
                    registration.unregister();
                    console.log('Service worker unregistered');
                });
            });
        }

        if ('caches' in window) {
            caches.keys().then(cacheNames => {
                cacheNames.forEach(cacheName => {
                    caches.delete(cacheName);
                    console.log('Deleted cache:', cacheName);
                });
            });
        }

        localStorage.clear();
        console.log('localStorage cleared');

        sessionStorage.clear();
        console.log('sessionStorage cleared');

        console.log('Cache clearing complete!');
        window.close();
    </script>
</body>
</html>
"#;

/// Writes the static files an operator opens in a browser to wipe the
/// frontend's client-side caches. The backend cannot reach those caches itself.
pub struct BrowserCacheArtifacts {
    indexed_db_name: String,
}

impl Default for BrowserCacheArtifacts {
    fn default() -> Self {
        Self::new(DEFAULT_INDEXED_DB_NAME)
    }
}

impl BrowserCacheArtifacts {
    pub fn new(indexed_db_name: impl Into<String>) -> Self {
        Self {
            indexed_db_name: indexed_db_name.into(),
        }
    }

    /// Page that unregisters service workers and empties the Cache API,
    /// localStorage and sessionStorage
    pub fn clear_cache_page(&self) -> &'static str {
        CLEAR_CACHE_HTML
    }

    /// Console script that deletes the dashboard's IndexedDB database
    pub fn indexed_db_script(&self) -> String {
        let name = serde_json::to_string(&self.indexed_db_name)
            .unwrap_or_else(|_| format!("\"{}\"", DEFAULT_INDEXED_DB_NAME));

        format!(
            r#"// Run in the browser console on the dashboard origin, or delete the
// database by hand under DevTools > Application > Storage > IndexedDB.
const DASHBOARD_DB = {name};

indexedDB.databases().then(databases => {{
    databases.forEach(db => {{
        if (db.name === DASHBOARD_DB) {{
            console.log('Found ' + DASHBOARD_DB + ' database, deleting...');
            const request = indexedDB.deleteDatabase(db.name);
            request.onsuccess = () => console.log('IndexedDB cleared successfully');
            request.onerror = () => console.error('Error clearing IndexedDB');
        }}
    }});
}});
"#
        )
    }

    /// Write `clear-cache.html` into the frontend's public directory
    pub fn write_clear_cache_page(&self, public_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = public_dir.as_ref().join(CLEAR_CACHE_PAGE);
        write_file(&path, self.clear_cache_page())?;
        info!("Created cache clearer at {}", path.display());
        Ok(path)
    }

    /// Write the IndexedDB clearing script into `dir`
    pub fn write_indexed_db_script(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(INDEXED_DB_SCRIPT);
        write_file(&path, &self.indexed_db_script())?;
        info!("Created IndexedDB clearing instructions at {}", path.display());
        Ok(path)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::Internal(format!("Failed to create directory: {}", e)))?;
    }

    std::fs::write(path, contents)
        .map_err(|e| Error::Internal(format!("Failed to write {}: {}", path.display(), e)))
}
