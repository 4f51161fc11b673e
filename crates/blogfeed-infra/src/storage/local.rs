//! Local filesystem image storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use blogfeed_core::domain::allowed_extension;
use blogfeed_core::ports::{ImageStorage, StorageError};

/// Directory under the media root, and URL prefix, for feature images.
const IMAGES_DIR: &str = "images";

/// Stores feature images as plain files:
/// ```text
/// {media_root}/
///   images/
///     {uuid}{ext}      # served as /images/{uuid}{ext}
/// ```
pub struct LocalImageStorage {
    media_root: PathBuf,
}

impl LocalImageStorage {
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }

    fn images_dir(&self) -> PathBuf {
        self.media_root.join(IMAGES_DIR)
    }

    /// Resolve a public path to a file inside the images directory.
    ///
    /// Only the final component is used, so `/images/../../etc/passwd`
    /// resolves to `images/passwd` and nothing outside the directory.
    fn resolve(&self, relative_path: &str) -> Option<PathBuf> {
        let name = Path::new(relative_path).file_name()?;
        Some(self.images_dir().join(name))
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn store(&self, data: &[u8], original_file_name: &str) -> Result<String, StorageError> {
        let ext = allowed_extension(original_file_name)
            .ok_or_else(|| StorageError::DisallowedExtension(original_file_name.to_string()))?;
        if data.is_empty() {
            return Err(StorageError::EmptyFile);
        }

        let dir = self.images_dir();
        fs::create_dir_all(&dir).await?;

        let file_name = format!("{}{}", Uuid::new_v4(), ext);
        fs::write(dir.join(&file_name), data).await?;

        tracing::debug!(file = %file_name, bytes = data.len(), "Stored feature image");
        Ok(format!("/{}/{}", IMAGES_DIR, file_name))
    }

    async fn delete(&self, relative_path: &str) -> Result<(), StorageError> {
        let Some(path) = self.resolve(relative_path) else {
            return Ok(());
        };

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Deleted feature image");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()), // Already deleted
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    async fn exists(&self, relative_path: &str) -> Result<bool, StorageError> {
        match self.resolve(relative_path) {
            Some(path) => Ok(fs::try_exists(&path).await?),
            None => Ok(false),
        }
    }
}
