//! Local filesystem storage for uploaded images.
//!
//! Files live flat in the upload directory under random names and are
//! addressed by their `/uploads/<name>` reference. Removing an image that a
//! deleted row pointed to happens only after the owning transaction commits
//! and only if no other row still uses it.

use std::io;
use std::path::{Path, PathBuf};

use sitecms_core::images::{file_name_of, new_file_name, reference_for};
use sitecms_db::repositories::ImageRefRepo;
use sitecms_db::DbPool;

/// Uploaded image files on local disk.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory served at `/uploads`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the root exists as a writable directory.
    pub async fn is_available(&self) -> bool {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
            Err(_) => false,
        }
    }

    /// Write `bytes` under a fresh name with the given extension and return
    /// the image reference.
    pub async fn save(&self, ext: &str, bytes: &[u8]) -> io::Result<String> {
        tokio::fs::create_dir_all(&self.root).await?;
        let name = new_file_name(ext);
        let path = self.root.join(&name);
        if let Err(e) = tokio::fs::write(&path, bytes).await {
            // Drop a partially written file so no reference to it can exist.
            let _ = tokio::fs::remove_file(&path).await;
            return Err(e);
        }
        tracing::debug!(file = %name, size = bytes.len(), "Image stored");
        Ok(reference_for(&name))
    }

    /// Filesystem path for a reference, or `None` if it is not a valid
    /// upload reference.
    pub fn path_for(&self, reference: &str) -> Option<PathBuf> {
        file_name_of(reference).map(|name| self.root.join(name))
    }

    /// Whether the referenced file is present.
    pub async fn exists(&self, reference: &str) -> bool {
        match self.path_for(reference) {
            Some(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            None => false,
        }
    }

    /// Delete the referenced file. Returns `false` if it was already gone.
    pub async fn remove(&self, reference: &str) -> io::Result<bool> {
        let Some(path) = self.path_for(reference) else {
            return Ok(false);
        };
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Remove every file in `references` that no content row still points at.
    ///
    /// Call after the deleting transaction has committed. Failures are logged
    /// and otherwise ignored.
    pub async fn release_unreferenced(&self, pool: &DbPool, references: &[String]) {
        for reference in references {
            match ImageRefRepo::is_referenced(pool, reference).await {
                Ok(true) => continue,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(reference = %reference, error = %e, "Could not check image references; keeping file");
                    continue;
                }
            }
            match self.remove(reference).await {
                Ok(true) => tracing::info!(reference = %reference, "Image file removed"),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(reference = %reference, error = %e, "Failed to remove image file")
                }
            }
        }
    }
}
