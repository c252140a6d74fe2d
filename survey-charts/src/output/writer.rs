//! Persist charts and the grouped-data snapshot.
//!
//! All writes overwrite existing files. Two groups whose sanitized paths are
//! equal write to the same file; the later one wins.

use std::path::Path;

use crate::error::{WriteError, WriteResult};
use crate::models::GroupedData;

/// Create `path` and its parents. Existing directories are fine.
pub async fn ensure_dir(path: &Path) -> WriteResult<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| WriteError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
}

/// Write chart bytes to `path`, replacing any existing file.
pub async fn write_image(path: &Path, bytes: &[u8]) -> WriteResult<()> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| WriteError::WriteFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize the snapshot: pretty-printed JSON, 2-space indent, UTF-8.
pub fn snapshot_json(grouped: &GroupedData) -> WriteResult<String> {
    Ok(serde_json::to_string_pretty(grouped)?)
}

/// Write the whole grouped structure to `path`, replacing any existing file.
pub async fn write_snapshot(path: &Path, grouped: &GroupedData) -> WriteResult<()> {
    let json = snapshot_json(grouped)?;
    tokio::fs::write(path, json.as_bytes())
        .await
        .map_err(|source| WriteError::WriteFile {
            path: path.to_path_buf(),
            source,
        })
}
