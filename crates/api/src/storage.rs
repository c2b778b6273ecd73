//! Local filesystem blob store for uploaded audio.
//!
//! Version rows store the full path returned by [`BlobStore::save`], so the
//! store itself stays a thin wrapper over `tokio::fs`. Deletes are
//! best-effort: a missing or undeletable file is logged and swallowed,
//! never surfaced to the client.

use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Writes and removes audio blobs under a configured root directory.
#[derive(Debug)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write `data` under `filename`, creating the root directory if
    /// needed. Returns the stored path as recorded in version rows.
    pub async fn save(&self, filename: &str, data: &[u8]) -> Result<String, AppError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create storage dir: {e}")))?;

        let path = self.root.join(filename);
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to write audio file: {e}")))?;

        Ok(path.to_string_lossy().to_string())
    }

    /// Remove a stored blob, tolerating absence. Failures are logged and
    /// ignored so orphaned files never block row deletion.
    pub async fn delete(&self, stored_path: &str) {
        match tokio::fs::remove_file(Path::new(stored_path)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = stored_path, error = %e, "Failed to delete audio blob");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_delete() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = BlobStore::new(dir.path());

        let stored = store.save("track_1_v1_abc.mp3", b"audio").await.expect("save");
        assert!(Path::new(&stored).exists());

        store.delete(&stored).await;
        assert!(!Path::new(&stored).exists());
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_silent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = BlobStore::new(dir.path());

        // Must not panic or error.
        store.delete(&dir.path().join("nope.mp3").to_string_lossy()).await;
    }
}
