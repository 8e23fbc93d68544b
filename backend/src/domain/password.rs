//! Credential hashing and verification.
//!
//! Uses bcrypt with a cost of 10 to match the original deployment's tuning.
//! Hashing and verification are CPU-bound, so both are moved off the async
//! executor with `spawn_blocking`.

use crate::domain::error::Error;

/// bcrypt cost factor used for new hashes.
pub const HASH_COST: u32 = 10;

/// Hash a plaintext password on a blocking thread.
///
/// # Errors
/// Returns an internal error when hashing fails or the blocking task is
/// cancelled.
pub async fn hash_password(plaintext: String, cost: u32) -> Result<String, Error> {
    tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
        .await
        .map_err(|err| Error::internal(format!("hashing task failed: {err}")))?
        .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
}

/// Verify a plaintext password against a stored hash on a blocking thread.
///
/// # Errors
/// Returns an internal error when the stored hash is unparsable or the
/// blocking task is cancelled.
pub async fn verify_password(plaintext: String, hash: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash))
        .await
        .map_err(|err| Error::internal(format!("verification task failed: {err}")))?
        .map_err(|err| Error::internal(format!("password verification failed: {err}")))
}
