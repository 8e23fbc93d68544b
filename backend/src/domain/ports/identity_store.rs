//! Driven port for user and admin account persistence.
//!
//! The store's uniqueness constraints are the sole arbiter for duplicate
//! registrations: any pre-insert existence check is advisory and adapters
//! must surface constraint violations as [`IdentityStoreError::Duplicate`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::admin::Admin;
use crate::domain::error::Error;
use crate::domain::user::{Uid, User};

/// Persistence errors raised by identity store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityStoreError {
    /// A unique index rejected the write (email or uid already taken).
    #[error("identity store uniqueness violation")]
    Duplicate,
    /// Query or mutation failed during execution.
    #[error("identity store query failed: {0}")]
    Backend(String),
}

impl From<IdentityStoreError> for Error {
    fn from(err: IdentityStoreError) -> Self {
        match err {
            IdentityStoreError::Duplicate => Error::conflict("User already exists"),
            IdentityStoreError::Backend(message) => Error::internal(message),
        }
    }
}

/// Port for the user and admin account stores.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Persist a new user record; duplicates fail with [`IdentityStoreError::Duplicate`].
    async fn insert_user(&self, user: &User) -> Result<(), IdentityStoreError>;

    /// Fetch a user by email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, IdentityStoreError>;

    /// Fetch a user by issued identifier.
    async fn find_user_by_uid(&self, uid: &Uid) -> Result<Option<User>, IdentityStoreError>;

    /// Snapshot of every user record.
    async fn list_users(&self) -> Result<Vec<User>, IdentityStoreError>;

    /// Total user count.
    async fn count_users(&self) -> Result<u64, IdentityStoreError>;

    /// Users created within the half-open `[start, end)` window.
    async fn count_users_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, IdentityStoreError>;

    /// Up to `limit` most recently created users, newest first.
    async fn recent_users(&self, limit: u32) -> Result<Vec<User>, IdentityStoreError>;

    /// Persist a new admin record; duplicates fail with [`IdentityStoreError::Duplicate`].
    async fn insert_admin(&self, admin: &Admin) -> Result<(), IdentityStoreError>;

    /// Fetch an admin by email.
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, IdentityStoreError>;

    /// Total admin count.
    async fn count_admins(&self) -> Result<u64, IdentityStoreError>;
}
