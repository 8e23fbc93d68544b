//! Driven port for the object storage gateway.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::error::Error;

/// Failures raised by object storage adapters. Not retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectStorageError {
    /// Uploading the object failed.
    #[error("object upload failed: {0}")]
    Upload(String),
    /// Minting a presigned retrieval URL failed.
    #[error("presigning failed: {0}")]
    Presign(String),
}

impl From<ObjectStorageError> for Error {
    fn from(err: ObjectStorageError) -> Self {
        Error::storage(err.to_string())
    }
}

/// Port for the content store holding uploaded documents.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store the bytes under the given key, overwriting any prior object.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), ObjectStorageError>;

    /// Mint a short-lived pre-authorised retrieval URL for a stored key.
    async fn presign_read(&self, key: &str, ttl: Duration)
        -> Result<String, ObjectStorageError>;
}
