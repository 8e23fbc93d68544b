//! Referral submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Name, email, and phone of a referrer or referred contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
}

/// A referral submission. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    /// The referring contact.
    pub user: Contact,
    /// Referred contacts, in submission order. Never empty.
    pub referrals: Vec<Contact>,
    /// Whether the referrer's email matched a registered user at submission.
    pub is_existing_user: bool,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}
