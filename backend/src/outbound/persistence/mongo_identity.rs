//! MongoDB adapter for the identity store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};

use crate::domain::admin::Admin;
use crate::domain::ports::{IdentityStore, IdentityStoreError};
use crate::domain::user::{Role, Uid, User};
use crate::outbound::persistence::mongo::is_duplicate_key;

/// Stored user document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRow {
    uid: String,
    name: String,
    email: String,
    phone: String,
    state: String,
    password_hash: String,
    role: Role,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            uid: user.uid.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            state: user.state.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = IdentityStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let uid: Uid = row
            .uid
            .parse()
            .map_err(|err| IdentityStoreError::Backend(format!("stored uid is invalid: {err}")))?;
        Ok(Self {
            uid,
            name: row.name,
            email: row.email,
            phone: row.phone,
            state: row.state,
            password_hash: row.password_hash,
            role: row.role,
            created_at: row.created_at,
        })
    }
}

/// Stored admin document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdminRow {
    name: String,
    email: String,
    phone: String,
    password_hash: String,
    role: Role,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl From<&Admin> for AdminRow {
    fn from(admin: &Admin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.clone(),
            phone: admin.phone.clone(),
            password_hash: admin.password_hash.clone(),
            role: admin.role,
            created_at: admin.created_at,
        }
    }
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Self {
            name: row.name,
            email: row.email,
            phone: row.phone,
            password_hash: row.password_hash,
            role: row.role,
            created_at: row.created_at,
        }
    }
}

/// [`IdentityStore`] over the `users` and `admins` collections.
pub struct MongoIdentityStore {
    users: Collection<UserRow>,
    admins: Collection<AdminRow>,
}

impl MongoIdentityStore {
    /// Bind to the collections of the given database.
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection("users"),
            admins: db.collection("admins"),
        }
    }

    /// Create the unique indexes that arbitrate duplicate registrations.
    ///
    /// # Errors
    /// Index creation failed.
    pub async fn ensure_indexes(&self) -> Result<(), IdentityStoreError> {
        let unique = IndexOptions::builder().unique(true).build();
        for keys in [doc! { "email": 1 }, doc! { "uid": 1 }] {
            self.users
                .create_index(
                    IndexModel::builder()
                        .keys(keys)
                        .options(unique.clone())
                        .build(),
                )
                .await
                .map_err(backend_error)?;
        }
        self.admins
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique)
                    .build(),
            )
            .await
            .map_err(backend_error)?;
        Ok(())
    }
}

fn backend_error(err: mongodb::error::Error) -> IdentityStoreError {
    IdentityStoreError::Backend(err.to_string())
}

fn write_error(err: mongodb::error::Error) -> IdentityStoreError {
    if is_duplicate_key(&err) {
        IdentityStoreError::Duplicate
    } else {
        backend_error(err)
    }
}

#[async_trait]
impl IdentityStore for MongoIdentityStore {
    async fn insert_user(&self, user: &User) -> Result<(), IdentityStoreError> {
        self.users
            .insert_one(UserRow::from(user))
            .await
            .map_err(write_error)?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, IdentityStoreError> {
        self.users
            .find_one(doc! { "email": email })
            .await
            .map_err(backend_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_user_by_uid(&self, uid: &Uid) -> Result<Option<User>, IdentityStoreError> {
        self.users
            .find_one(doc! { "uid": uid.as_str() })
            .await
            .map_err(backend_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, IdentityStoreError> {
        let rows: Vec<UserRow> = self
            .users
            .find(doc! {})
            .await
            .map_err(backend_error)?
            .try_collect()
            .await
            .map_err(backend_error)?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn count_users(&self) -> Result<u64, IdentityStoreError> {
        self.users
            .count_documents(doc! {})
            .await
            .map_err(backend_error)
    }

    async fn count_users_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, IdentityStoreError> {
        let filter = doc! {
            "createdAt": {
                "$gte": mongodb::bson::DateTime::from_chrono(start),
                "$lt": mongodb::bson::DateTime::from_chrono(end),
            }
        };
        self.users
            .count_documents(filter)
            .await
            .map_err(backend_error)
    }

    async fn recent_users(&self, limit: u32) -> Result<Vec<User>, IdentityStoreError> {
        let rows: Vec<UserRow> = self
            .users
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .limit(i64::from(limit))
            .await
            .map_err(backend_error)?
            .try_collect()
            .await
            .map_err(backend_error)?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn insert_admin(&self, admin: &Admin) -> Result<(), IdentityStoreError> {
        self.admins
            .insert_one(AdminRow::from(admin))
            .await
            .map_err(write_error)?;
        Ok(())
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, IdentityStoreError> {
        Ok(self
            .admins
            .find_one(doc! { "email": email })
            .await
            .map_err(backend_error)?
            .map(Admin::from))
    }

    async fn count_admins(&self) -> Result<u64, IdentityStoreError> {
        self.admins
            .count_documents(doc! {})
            .await
            .map_err(backend_error)
    }
}
