//! Presence checks shared by the domain services.
//!
//! Input validation is deliberately limited to presence and identifier
//! well-formedness; no further sanitization is performed.

use serde_json::json;

use crate::domain::error::Error;

/// Fail with an invalid-request error when a required field is blank.
pub fn require_present(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        Err(Error::invalid_request("All fields are required")
            .with_details(json!({ "field": field })))
    } else {
        Ok(())
    }
}
