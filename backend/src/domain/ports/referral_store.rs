//! Driven port for referral submissions.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::referral::Referral;

/// Persistence errors raised by referral store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferralStoreError {
    /// Query or mutation failed during execution.
    #[error("referral store query failed: {0}")]
    Backend(String),
}

impl From<ReferralStoreError> for Error {
    fn from(err: ReferralStoreError) -> Self {
        let ReferralStoreError::Backend(message) = err;
        Error::internal(message)
    }
}

/// Port for the referral store. Records are immutable once written.
#[async_trait]
pub trait ReferralStore: Send + Sync {
    /// Persist a referral submission.
    async fn insert(&self, referral: &Referral) -> Result<(), ReferralStoreError>;

    /// Snapshot of every referral record.
    async fn list_all(&self) -> Result<Vec<Referral>, ReferralStoreError>;
}
