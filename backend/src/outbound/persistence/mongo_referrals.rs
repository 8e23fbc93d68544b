//! MongoDB adapter for the referral store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{ReferralStore, ReferralStoreError};
use crate::domain::referral::{Contact, Referral};

/// Stored referral document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReferralRow {
    user: Contact,
    referrals: Vec<Contact>,
    is_existing_user: bool,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl From<&Referral> for ReferralRow {
    fn from(referral: &Referral) -> Self {
        Self {
            user: referral.user.clone(),
            referrals: referral.referrals.clone(),
            is_existing_user: referral.is_existing_user,
            created_at: referral.created_at,
        }
    }
}

impl From<ReferralRow> for Referral {
    fn from(row: ReferralRow) -> Self {
        Self {
            user: row.user,
            referrals: row.referrals,
            is_existing_user: row.is_existing_user,
            created_at: row.created_at,
        }
    }
}

/// [`ReferralStore`] over the `referrals` collection.
pub struct MongoReferralStore {
    records: Collection<ReferralRow>,
}

impl MongoReferralStore {
    /// Bind to the collection of the given database.
    pub fn new(db: &Database) -> Self {
        Self {
            records: db.collection("referrals"),
        }
    }
}

fn backend_error(err: mongodb::error::Error) -> ReferralStoreError {
    ReferralStoreError::Backend(err.to_string())
}

#[async_trait]
impl ReferralStore for MongoReferralStore {
    async fn insert(&self, referral: &Referral) -> Result<(), ReferralStoreError> {
        self.records
            .insert_one(ReferralRow::from(referral))
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Referral>, ReferralStoreError> {
        let rows: Vec<ReferralRow> = self
            .records
            .find(doc! {})
            .await
            .map_err(backend_error)?
            .try_collect()
            .await
            .map_err(backend_error)?;
        Ok(rows.into_iter().map(Referral::from).collect())
    }
}
