//! Object storage adapter over an S3-compatible operator.

use std::time::Duration;

use async_trait::async_trait;
use opendal::{services::S3, Operator};

use crate::domain::ports::{ObjectStorage, ObjectStorageError};
use crate::domain::Error;
use crate::server::config::StorageConfig;

/// [`ObjectStorage`] backed by an S3 bucket.
pub struct S3Storage {
    operator: Operator,
}

impl S3Storage {
    /// Build the operator from bucket configuration.
    ///
    /// # Errors
    /// Invalid bucket configuration.
    pub fn new(config: &StorageConfig) -> Result<Self, Error> {
        let mut builder = S3::default()
            .bucket(&config.bucket)
            .region(&config.region)
            .access_key_id(&config.access_key_id)
            .secret_access_key(&config.secret_access_key);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint(endpoint);
        }

        let operator = Operator::new(builder)
            .map_err(|err| Error::internal(format!("object storage setup failed: {err}")))?
            .finish();
        Ok(Self { operator })
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), ObjectStorageError> {
        self.operator
            .write(key, bytes)
            .await
            .map_err(|err| ObjectStorageError::Upload(err.to_string()))?;
        Ok(())
    }

    async fn presign_read(
        &self,
        key: &str,
        ttl: Duration,
    ) -> Result<String, ObjectStorageError> {
        let request = self
            .operator
            .presign_read(key, ttl)
            .await
            .map_err(|err| ObjectStorageError::Presign(err.to_string()))?;
        Ok(request.uri().to_string())
    }
}
