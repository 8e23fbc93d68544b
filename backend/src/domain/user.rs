//! User account records and the issued `uid` identifier.

use std::fmt;

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Prefix carried by every issued user identifier.
const UID_PREFIX: &str = "ATS";
/// Random alphanumeric characters appended after the date stamp.
const UID_SUFFIX_LEN: usize = 4;

/// Account role resolved at authentication time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Self-registered account.
    User,
    /// Provisioned dashboard operator.
    Admin,
}

/// Errors produced when parsing an issued user identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UidParseError {
    /// The identifier is empty.
    #[error("user id must not be empty")]
    Empty,
    /// The identifier does not match the `ATS` + date + suffix shape.
    #[error("user id is not a well-formed identifier")]
    Malformed,
}

/// Human-readable unique user identifier, distinct from any storage id.
///
/// Canonical format: `ATS` + two-digit year, month, and day + four random
/// alphanumeric characters, e.g. `ATS260829X4QZ`. Legacy identifier shapes
/// from earlier prototypes are rejected.
///
/// # Examples
/// ```
/// use backend::domain::Uid;
///
/// let uid: Uid = "ATS260829X4QZ".parse().expect("well-formed uid");
/// assert_eq!(uid.as_str(), "ATS260829X4QZ");
/// assert!("AT2025071752...".parse::<Uid>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uid(String);

impl Uid {
    /// Issue a fresh identifier stamped with today's local date.
    pub fn issue() -> Self {
        Self::issue_on(Local::now().date_naive())
    }

    /// Issue a fresh identifier stamped with the given date.
    pub fn issue_on(date: NaiveDate) -> Self {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(UID_SUFFIX_LEN)
            .map(|b| char::from(b).to_ascii_uppercase())
            .collect();
        Self(format!(
            "{UID_PREFIX}{:02}{:02}{:02}{suffix}",
            date.year() % 100,
            date.month(),
            date.day(),
        ))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn from_owned(raw: String) -> Result<Self, UidParseError> {
        if raw.is_empty() {
            return Err(UidParseError::Empty);
        }
        let rest = raw.strip_prefix(UID_PREFIX).ok_or(UidParseError::Malformed)?;
        if rest.len() != 6 + UID_SUFFIX_LEN {
            return Err(UidParseError::Malformed);
        }
        let (date, suffix) = rest.split_at(6);
        if !date.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UidParseError::Malformed);
        }
        if !suffix.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(UidParseError::Malformed);
        }
        Ok(Self(raw))
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::str::FromStr for Uid {
    type Err = UidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_owned(s.to_owned())
    }
}

impl TryFrom<String> for Uid {
    type Error = UidParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

impl From<Uid> for String {
    fn from(value: Uid) -> Self {
        value.0
    }
}

/// Registered user account as held by the identity store.
///
/// ## Invariants
/// - `email` is unique across the user store.
/// - `uid` is unique across the user store.
/// - Never updated or deleted by any exposed operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Issued human-readable identifier.
    pub uid: Uid,
    /// Full name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// State or region.
    pub state: String,
    /// bcrypt hash of the account password.
    pub password_hash: String,
    /// Always [`Role::User`] for self-registered accounts.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Public projection of a [`User`] with the password hash stripped.
///
/// Applied at the domain boundary so no handler can leak a hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Issued human-readable identifier.
    #[schema(example = "ATS260829X4QZ")]
    pub uid: String,
    /// Full name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// State or region.
    pub state: String,
    /// Account role.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            uid: user.uid.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            state: user.state.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
