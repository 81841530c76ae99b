//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server only imports `service`.

use std::path::Path;

/// Ensure the data directory exists; warn on a missing frontend directory.
pub async fn ensure_env(frontend_dir: &str, data_dir: &Path) -> anyhow::Result<()> {
    common::env::ensure_env(frontend_dir, data_dir).await
}
