//! MongoDB connection bootstrap and shared error mapping.

use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Client, Database};

use crate::domain::Error;
use crate::server::config::MongoConfig;

/// Server-side code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Connect to the configured database.
///
/// # Errors
/// Unreachable server or malformed connection string.
pub async fn connect(config: &MongoConfig) -> Result<Database, Error> {
    let client = Client::with_uri_str(&config.uri)
        .await
        .map_err(|err| Error::internal(format!("mongodb connection failed: {err}")))?;
    Ok(client.database(&config.database))
}

/// Whether a driver error is a unique index violation.
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        _ => false,
    }
}
