//! Document-link records tying uploaded files to their owning user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::user::Uid;

/// A single uploaded-file entry inside a user's document-link record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEntry {
    /// Sub-identifier unique across all document-link records.
    pub id: Uuid,
    /// Display name (explicit name or the original filename).
    pub name: String,
    /// Key of the stored object in the object storage gateway.
    pub storage_key: String,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

/// Per-user document-link record.
///
/// ## Invariants
/// - At most one record per user; uploads append to `documents` in order.
/// - `user_id` must resolve to an existing user when written.
/// - Never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocuments {
    /// Owning user's issued identifier (non-owning reference).
    pub user_id: Uid,
    /// Ordered upload entries, oldest first.
    pub documents: Vec<DocumentEntry>,
    /// Timestamp of the first upload.
    pub created_at: DateTime<Utc>,
}

/// Listing view of an entry enriched with a short-lived retrieval URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignedDocument {
    /// Entry sub-identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Time-limited pre-authorised retrieval link.
    pub signed_url: String,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

/// Owner summary joined onto document records for the admin listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOwner {
    /// Issued user identifier.
    pub uid: String,
    /// Owner's full name.
    pub name: String,
    /// Owner's email address.
    pub email: String,
}

/// Admin view of one document-link record joined with its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnedDocuments {
    /// Owning user summary.
    pub user: DocumentOwner,
    /// Ordered upload entries, oldest first.
    pub documents: Vec<DocumentEntry>,
    /// Timestamp of the first upload.
    pub created_at: DateTime<Utc>,
}

/// An uploaded file handed to the document service by an inbound adapter.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename supplied by the client.
    pub original_name: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}
