//! Driven port for per-user document-link records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::document::{DocumentEntry, UserDocuments};
use crate::domain::error::Error;
use crate::domain::user::Uid;

/// Persistence errors raised by document store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentStoreError {
    /// Query or mutation failed during execution.
    #[error("document store query failed: {0}")]
    Backend(String),
}

impl From<DocumentStoreError> for Error {
    fn from(err: DocumentStoreError) -> Self {
        let DocumentStoreError::Backend(message) = err;
        Error::internal(message)
    }
}

/// Port for the document-link store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append entries to the user's record, creating it when absent.
    ///
    /// Must be a single atomic find-or-create-and-append so concurrent
    /// uploads for the same user cannot lose updates. Returns the full
    /// updated sequence in upload order.
    async fn append(
        &self,
        user_id: &Uid,
        entries: &[DocumentEntry],
    ) -> Result<Vec<DocumentEntry>, DocumentStoreError>;

    /// Fetch the record for one user, if present.
    async fn find_for_user(&self, user_id: &Uid)
        -> Result<Option<UserDocuments>, DocumentStoreError>;

    /// Search every record for the entry with the given sub-identifier.
    async fn find_entry(&self, id: Uuid) -> Result<Option<DocumentEntry>, DocumentStoreError>;

    /// Snapshot of every document-link record.
    async fn list_all(&self) -> Result<Vec<UserDocuments>, DocumentStoreError>;
}
