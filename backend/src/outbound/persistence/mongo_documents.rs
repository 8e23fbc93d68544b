//! MongoDB adapter for the document-link store.
//!
//! Appends use a single `$push`/`$setOnInsert` upsert so concurrent uploads
//! for the same user serialise at the server instead of racing a
//! read-modify-write cycle.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, to_bson};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::document::{DocumentEntry, UserDocuments};
use crate::domain::ports::{DocumentStore, DocumentStoreError};
use crate::domain::user::Uid;

/// One embedded upload entry.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryRow {
    id: String,
    name: String,
    storage_key: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    uploaded_at: DateTime<Utc>,
}

impl From<&DocumentEntry> for EntryRow {
    fn from(entry: &DocumentEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            name: entry.name.clone(),
            storage_key: entry.storage_key.clone(),
            uploaded_at: entry.uploaded_at,
        }
    }
}

impl TryFrom<EntryRow> for DocumentEntry {
    type Error = DocumentStoreError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let id = row.id.parse::<Uuid>().map_err(|err| {
            DocumentStoreError::Backend(format!("stored entry id is invalid: {err}"))
        })?;
        Ok(Self {
            id,
            name: row.name,
            storage_key: row.storage_key,
            uploaded_at: row.uploaded_at,
        })
    }
}

/// Stored per-user record.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordRow {
    user_id: String,
    documents: Vec<EntryRow>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl TryFrom<RecordRow> for UserDocuments {
    type Error = DocumentStoreError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let user_id: Uid = row.user_id.parse().map_err(|err| {
            DocumentStoreError::Backend(format!("stored user id is invalid: {err}"))
        })?;
        Ok(Self {
            user_id,
            documents: row
                .documents
                .into_iter()
                .map(DocumentEntry::try_from)
                .collect::<Result<_, _>>()?,
            created_at: row.created_at,
        })
    }
}

/// [`DocumentStore`] over the `userDocs` collection.
pub struct MongoDocumentStore {
    records: Collection<RecordRow>,
}

impl MongoDocumentStore {
    /// Bind to the collection of the given database.
    pub fn new(db: &Database) -> Self {
        Self {
            records: db.collection("userDocs"),
        }
    }

    /// Create the unique per-user index.
    ///
    /// # Errors
    /// Index creation failed.
    pub async fn ensure_indexes(&self) -> Result<(), DocumentStoreError> {
        self.records
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "userId": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await
            .map_err(backend_error)?;
        Ok(())
    }
}

fn backend_error(err: mongodb::error::Error) -> DocumentStoreError {
    DocumentStoreError::Backend(err.to_string())
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn append(
        &self,
        user_id: &Uid,
        entries: &[DocumentEntry],
    ) -> Result<Vec<DocumentEntry>, DocumentStoreError> {
        let rows: Vec<EntryRow> = entries.iter().map(EntryRow::from).collect();
        let pushed = to_bson(&rows)
            .map_err(|err| DocumentStoreError::Backend(format!("entry encoding failed: {err}")))?;

        self.records
            .update_one(
                doc! { "userId": user_id.as_str() },
                doc! {
                    "$push": { "documents": { "$each": pushed } },
                    "$setOnInsert": {
                        "createdAt": mongodb::bson::DateTime::from_chrono(Utc::now()),
                    },
                },
            )
            .upsert(true)
            .await
            .map_err(backend_error)?;

        let record = self
            .find_for_user(user_id)
            .await?
            .ok_or_else(|| DocumentStoreError::Backend("upserted record missing".into()))?;
        Ok(record.documents)
    }

    async fn find_for_user(
        &self,
        user_id: &Uid,
    ) -> Result<Option<UserDocuments>, DocumentStoreError> {
        self.records
            .find_one(doc! { "userId": user_id.as_str() })
            .await
            .map_err(backend_error)?
            .map(UserDocuments::try_from)
            .transpose()
    }

    async fn find_entry(&self, id: Uuid) -> Result<Option<DocumentEntry>, DocumentStoreError> {
        let record = self
            .records
            .find_one(doc! { "documents.id": id.to_string() })
            .await
            .map_err(backend_error)?;
        let Some(record) = record else {
            return Ok(None);
        };
        let wanted = id.to_string();
        record
            .documents
            .into_iter()
            .find(|row| row.id == wanted)
            .map(DocumentEntry::try_from)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<UserDocuments>, DocumentStoreError> {
        let rows: Vec<RecordRow> = self
            .records
            .find(doc! {})
            .await
            .map_err(backend_error)?
            .try_collect()
            .await
            .map_err(backend_error)?;
        rows.into_iter().map(UserDocuments::try_from).collect()
    }
}
