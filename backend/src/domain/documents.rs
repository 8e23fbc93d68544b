//! Document attachment, signed listing, and admin join.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::domain::document::{
    DocumentEntry, DocumentOwner, OwnedDocuments, SignedDocument, UploadedFile,
};
use crate::domain::error::Error;
use crate::domain::ports::{DocumentStore, IdentityStore, ObjectStorage};
use crate::domain::user::Uid;

/// Default lifetime of minted retrieval URLs.
pub const DEFAULT_PRESIGN_TTL: Duration = Duration::from_secs(300);

/// Domain service for per-user document-link records.
pub struct DocumentService {
    documents: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentityStore>,
    storage: Arc<dyn ObjectStorage>,
    presign_ttl: Duration,
}

impl DocumentService {
    /// Construct with the default presign TTL.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityStore>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self::with_presign_ttl(documents, identity, storage, DEFAULT_PRESIGN_TTL)
    }

    /// Construct with an explicit presign TTL.
    pub fn with_presign_ttl(
        documents: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityStore>,
        storage: Arc<dyn ObjectStorage>,
        presign_ttl: Duration,
    ) -> Self {
        Self {
            documents,
            identity,
            storage,
            presign_ttl,
        }
    }

    /// Upload files and append their entries to the user's record.
    ///
    /// Explicit display names, when given, must match the file count; entries
    /// fall back to the original filename otherwise. The append is a single
    /// atomic upsert at the store, and the full updated sequence is returned.
    ///
    /// # Errors
    /// - invalid request when no files are given, the id is malformed, or
    ///   the name count mismatches
    /// - storage error when an upload fails
    pub async fn attach(
        &self,
        user_id: &str,
        files: Vec<UploadedFile>,
        names: Option<Vec<String>>,
    ) -> Result<Vec<DocumentEntry>, Error> {
        let uid = parse_uid(user_id)?;
        if files.is_empty() {
            return Err(Error::invalid_request("No files uploaded"));
        }
        if let Some(names) = &names {
            if names.len() != files.len() {
                return Err(Error::invalid_request(
                    "Document name count does not match file count",
                )
                .with_details(json!({ "files": files.len(), "names": names.len() })));
            }
        }

        let mut entries = Vec::with_capacity(files.len());
        for (index, file) in files.into_iter().enumerate() {
            let uploaded_at = Utc::now();
            let storage_key = format!(
                "{uid}-{}-{}",
                uploaded_at.timestamp_millis(),
                file.original_name
            );
            self.storage.put(&storage_key, file.bytes).await?;
            let name = names
                .as_ref()
                .and_then(|names| names.get(index).cloned())
                .unwrap_or(file.original_name);
            entries.push(DocumentEntry {
                id: Uuid::new_v4(),
                name,
                storage_key,
                uploaded_at,
            });
        }

        Ok(self.documents.append(&uid, &entries).await?)
    }

    /// List a user's documents with short-lived retrieval URLs.
    ///
    /// # Errors
    /// - invalid request on a malformed id
    /// - not found when the user has no record
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<SignedDocument>, Error> {
        let uid = parse_uid(user_id)?;
        let record = self
            .documents
            .find_for_user(&uid)
            .await?
            .ok_or_else(|| Error::not_found("No documents found for this user"))?;

        let mut signed = Vec::with_capacity(record.documents.len());
        for entry in record.documents {
            let signed_url = self
                .storage
                .presign_read(&entry.storage_key, self.presign_ttl)
                .await?;
            signed.push(SignedDocument {
                id: entry.id,
                name: entry.name,
                signed_url,
                uploaded_at: entry.uploaded_at,
            });
        }
        Ok(signed)
    }

    /// Resolve one document entry to a retrieval URL.
    ///
    /// # Errors
    /// Not found when no record holds the entry, regardless of how many
    /// other documents exist.
    pub async fn resolve(&self, document_id: Uuid) -> Result<String, Error> {
        let entry = self
            .documents
            .find_entry(document_id)
            .await?
            .ok_or_else(|| Error::not_found("Document not found"))?;
        Ok(self
            .storage
            .presign_read(&entry.storage_key, self.presign_ttl)
            .await?)
    }

    /// Every document-link record joined with its owner's summary.
    ///
    /// The join runs here because users and document records live in
    /// separate namespaces. Records whose owner no longer resolves are
    /// skipped with a warning; no deletion path exists, so a miss points at
    /// an external data problem.
    pub async fn list_all_with_owners(&self) -> Result<Vec<OwnedDocuments>, Error> {
        let records = self.documents.list_all().await?;
        let mut joined = Vec::with_capacity(records.len());
        for record in records {
            let Some(owner) = self.identity.find_user_by_uid(&record.user_id).await? else {
                warn!(user_id = %record.user_id, "document record with unresolvable owner");
                continue;
            };
            joined.push(OwnedDocuments {
                user: DocumentOwner {
                    uid: owner.uid.to_string(),
                    name: owner.name,
                    email: owner.email,
                },
                documents: record.documents,
                created_at: record.created_at,
            });
        }
        Ok(joined)
    }
}

fn parse_uid(raw: &str) -> Result<Uid, Error> {
    raw.parse().map_err(|_| {
        Error::invalid_request("Invalid user id").with_details(json!({ "userId": raw }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::user::{Role, User};
    use crate::test_support::{InMemoryDocumentStore, InMemoryIdentityStore, InMemoryObjectStorage};

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            original_name: name.into(),
            bytes: name.as_bytes().to_vec(),
        }
    }

    struct Fixture {
        service: DocumentService,
        identity: Arc<InMemoryIdentityStore>,
        storage: Arc<InMemoryObjectStorage>,
    }

    fn fixture() -> Fixture {
        let identity = Arc::new(InMemoryIdentityStore::default());
        let storage = Arc::new(InMemoryObjectStorage::default());
        let service = DocumentService::new(
            Arc::new(InMemoryDocumentStore::default()),
            identity.clone(),
            storage.clone(),
        );
        Fixture {
            service,
            identity,
            storage,
        }
    }

    async fn seed_user(identity: &InMemoryIdentityStore, email: &str) -> Uid {
        let user = User {
            uid: Uid::issue(),
            name: "Asha Rao".into(),
            email: email.into(),
            phone: "9876500000".into(),
            state: "Kerala".into(),
            password_hash: "$2b$10$hash".into(),
            role: Role::User,
            created_at: Utc::now(),
        };
        crate::domain::ports::IdentityStore::insert_user(identity, &user)
            .await
            .expect("seeds user");
        user.uid
    }

    #[tokio::test]
    async fn name_count_mismatch_is_rejected_before_upload() {
        let fx = fixture();
        let uid = seed_user(&fx.identity, "asha@example.com").await;
        let err = fx
            .service
            .attach(
                uid.as_str(),
                vec![file("a.pdf"), file("b.pdf"), file("c.pdf")],
                Some(vec!["PAN".into(), "Aadhaar".into()]),
            )
            .await
            .expect_err("mismatch rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(fx.storage.object_count(), 0);
    }

    #[tokio::test]
    async fn consecutive_batches_append_in_order() {
        let fx = fixture();
        let uid = seed_user(&fx.identity, "asha@example.com").await;

        let first = fx
            .service
            .attach(
                uid.as_str(),
                vec![file("a.pdf"), file("b.pdf"), file("c.pdf")],
                Some(vec!["A".into(), "B".into(), "C".into()]),
            )
            .await
            .expect("first batch");
        assert_eq!(first.len(), 3);

        let second = fx
            .service
            .attach(
                uid.as_str(),
                vec![file("d.pdf"), file("e.pdf"), file("f.pdf")],
                Some(vec!["D".into(), "E".into(), "F".into()]),
            )
            .await
            .expect("second batch");
        let names: Vec<_> = second.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C", "D", "E", "F"]);
    }

    #[tokio::test]
    async fn listing_mints_a_signed_url_per_entry() {
        let fx = fixture();
        let uid = seed_user(&fx.identity, "asha@example.com").await;
        fx.service
            .attach(uid.as_str(), vec![file("a.pdf")], None)
            .await
            .expect("attaches");

        let listed = fx.service.list_for_user(uid.as_str()).await.expect("lists");
        assert_eq!(listed.len(), 1);
        assert!(listed[0].signed_url.contains("expires"));
        assert_eq!(listed[0].name, "a.pdf");
    }

    #[tokio::test]
    async fn listing_unknown_user_is_not_found_and_bad_id_invalid() {
        let fx = fixture();
        let absent = fx
            .service
            .list_for_user(Uid::issue().as_str())
            .await
            .expect_err("no record");
        assert_eq!(absent.code(), ErrorCode::NotFound);

        let malformed = fx
            .service
            .list_for_user("not-a-uid")
            .await
            .expect_err("malformed id");
        assert_eq!(malformed.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn resolving_unknown_entry_is_not_found_despite_other_documents() {
        let fx = fixture();
        let uid = seed_user(&fx.identity, "asha@example.com").await;
        fx.service
            .attach(uid.as_str(), vec![file("a.pdf")], None)
            .await
            .expect("attaches");

        let err = fx
            .service
            .resolve(Uuid::new_v4())
            .await
            .expect_err("unknown entry");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn admin_listing_joins_owner_details() {
        let fx = fixture();
        let uid = seed_user(&fx.identity, "asha@example.com").await;
        fx.service
            .attach(uid.as_str(), vec![file("a.pdf")], None)
            .await
            .expect("attaches");

        let all = fx.service.list_all_with_owners().await.expect("joins");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].user.email, "asha@example.com");
        assert_eq!(all[0].user.uid, uid.to_string());
        assert_eq!(all[0].documents.len(), 1);
    }
}
