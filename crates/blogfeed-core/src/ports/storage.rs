//! Feature image storage port.

use async_trait::async_trait;

/// Stores uploaded feature images under the public media root.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Write `data` under a freshly generated name and return its public
    /// relative path (`/images/<name>`). Rejects names outside the allow-list
    /// without writing anything.
    async fn store(&self, data: &[u8], original_file_name: &str) -> Result<String, StorageError>;

    /// Remove the file behind `relative_path`. A missing file is not an error.
    async fn delete(&self, relative_path: &str) -> Result<(), StorageError>;

    /// Whether the file behind `relative_path` is present.
    async fn exists(&self, relative_path: &str) -> Result<bool, StorageError>;
}

/// Image storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Disallowed file extension: {0}")]
    DisallowedExtension(String),

    #[error("Uploaded file is empty")]
    EmptyFile,

    #[error("I/O failure: {0}")]
    Io(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
