//! Domain events published to the admin live-update channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::User;

/// Event published when a user registers successfully.
///
/// Carried over an at-most-once broadcast channel; the payload never
/// includes the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupEvent {
    /// Issued user identifier.
    pub uid: String,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// State or region.
    pub state: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for SignupEvent {
    fn from(user: &User) -> Self {
        Self {
            uid: user.uid.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            state: user.state.clone(),
            created_at: user.created_at,
        }
    }
}
