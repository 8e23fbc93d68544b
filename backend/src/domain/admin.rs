//! Admin account records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::Role;

/// Provisioned admin account as held by the identity store.
///
/// ## Invariants
/// - `email` is unique across the admin store.
/// - No update or delete path exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    /// Full name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// bcrypt hash of the account password.
    pub password_hash: String,
    /// Always [`Role::Admin`].
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Public projection of an [`Admin`] with the password hash stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicAdmin {
    /// Full name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Account role.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Admin> for PublicAdmin {
    fn from(admin: &Admin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.clone(),
            phone: admin.phone.clone(),
            role: admin.role,
            created_at: admin.created_at,
        }
    }
}

impl From<Admin> for PublicAdmin {
    fn from(admin: Admin) -> Self {
        Self::from(&admin)
    }
}
