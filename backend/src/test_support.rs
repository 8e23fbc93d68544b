//! In-memory port fakes shared by unit and integration tests.
//!
//! Enabled for this crate's own tests and for downstream consumers via the
//! `test-support` feature. The fakes honour the same contracts as the real
//! adapters: uniqueness violations surface as `Duplicate`, document appends
//! happen under a single lock, and presigned URLs carry an expiry marker.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::admin::Admin;
use crate::domain::document::{DocumentEntry, UserDocuments};
use crate::domain::events::SignupEvent;
use crate::domain::ports::{
    DeliveryFailure, DocumentStore, DocumentStoreError, IdentityStore, IdentityStoreError,
    LiveFeed, MailMessage, MailReceipt, Mailer, ObjectStorage, ObjectStorageError, ReferralStore,
    ReferralStoreError,
};
use crate::domain::referral::Referral;
use crate::domain::user::{Uid, User};

/// Identity store backed by vectors behind a mutex.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    users: Mutex<Vec<User>>,
    admins: Mutex<Vec<Admin>>,
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn insert_user(&self, user: &User) -> Result<(), IdentityStoreError> {
        let mut users = self.users.lock().expect("users lock");
        if users
            .iter()
            .any(|existing| existing.email == user.email || existing.uid == user.uid)
        {
            return Err(IdentityStoreError::Duplicate);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, IdentityStoreError> {
        let users = self.users.lock().expect("users lock");
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn find_user_by_uid(&self, uid: &Uid) -> Result<Option<User>, IdentityStoreError> {
        let users = self.users.lock().expect("users lock");
        Ok(users.iter().find(|user| &user.uid == uid).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, IdentityStoreError> {
        Ok(self.users.lock().expect("users lock").clone())
    }

    async fn count_users(&self) -> Result<u64, IdentityStoreError> {
        Ok(self.users.lock().expect("users lock").len() as u64)
    }

    async fn count_users_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, IdentityStoreError> {
        let users = self.users.lock().expect("users lock");
        Ok(users
            .iter()
            .filter(|user| user.created_at >= start && user.created_at < end)
            .count() as u64)
    }

    async fn recent_users(&self, limit: u32) -> Result<Vec<User>, IdentityStoreError> {
        let mut users = self.users.lock().expect("users lock").clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        users.truncate(limit as usize);
        Ok(users)
    }

    async fn insert_admin(&self, admin: &Admin) -> Result<(), IdentityStoreError> {
        let mut admins = self.admins.lock().expect("admins lock");
        if admins.iter().any(|existing| existing.email == admin.email) {
            return Err(IdentityStoreError::Duplicate);
        }
        admins.push(admin.clone());
        Ok(())
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, IdentityStoreError> {
        let admins = self.admins.lock().expect("admins lock");
        Ok(admins.iter().find(|admin| admin.email == email).cloned())
    }

    async fn count_admins(&self) -> Result<u64, IdentityStoreError> {
        Ok(self.admins.lock().expect("admins lock").len() as u64)
    }
}

/// Document store with appends serialised under one lock.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    records: Mutex<Vec<UserDocuments>>,
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn append(
        &self,
        user_id: &Uid,
        entries: &[DocumentEntry],
    ) -> Result<Vec<DocumentEntry>, DocumentStoreError> {
        let mut records = self.records.lock().expect("records lock");
        if let Some(record) = records.iter_mut().find(|record| &record.user_id == user_id) {
            record.documents.extend_from_slice(entries);
            return Ok(record.documents.clone());
        }
        records.push(UserDocuments {
            user_id: user_id.clone(),
            documents: entries.to_vec(),
            created_at: Utc::now(),
        });
        Ok(entries.to_vec())
    }

    async fn find_for_user(
        &self,
        user_id: &Uid,
    ) -> Result<Option<UserDocuments>, DocumentStoreError> {
        let records = self.records.lock().expect("records lock");
        Ok(records
            .iter()
            .find(|record| &record.user_id == user_id)
            .cloned())
    }

    async fn find_entry(&self, id: Uuid) -> Result<Option<DocumentEntry>, DocumentStoreError> {
        let records = self.records.lock().expect("records lock");
        Ok(records
            .iter()
            .flat_map(|record| record.documents.iter())
            .find(|entry| entry.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<UserDocuments>, DocumentStoreError> {
        Ok(self.records.lock().expect("records lock").clone())
    }
}

/// Append-only referral store.
#[derive(Debug, Default)]
pub struct InMemoryReferralStore {
    records: Mutex<Vec<Referral>>,
}

#[async_trait]
impl ReferralStore for InMemoryReferralStore {
    async fn insert(&self, referral: &Referral) -> Result<(), ReferralStoreError> {
        self.records
            .lock()
            .expect("records lock")
            .push(referral.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Referral>, ReferralStoreError> {
        Ok(self.records.lock().expect("records lock").clone())
    }
}

/// Object storage keeping bytes in a map and minting deterministic URLs.
#[derive(Debug, Default)]
pub struct InMemoryObjectStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryObjectStorage {
    /// Number of stored objects.
    pub fn object_count(&self) -> usize {
        self.objects.lock().expect("objects lock").len()
    }

    /// Stored bytes for a key, if any.
    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().expect("objects lock").get(key).cloned()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), ObjectStorageError> {
        self.objects
            .lock()
            .expect("objects lock")
            .insert(key.to_owned(), bytes);
        Ok(())
    }

    async fn presign_read(
        &self,
        key: &str,
        ttl: Duration,
    ) -> Result<String, ObjectStorageError> {
        let objects = self.objects.lock().expect("objects lock");
        if !objects.contains_key(key) {
            return Err(ObjectStorageError::Presign(format!("no such object: {key}")));
        }
        Ok(format!(
            "https://storage.test/{key}?expires={}",
            ttl.as_secs()
        ))
    }
}

/// Live feed capturing every published event for later assertions.
#[derive(Debug, Default)]
pub struct CapturedFeed {
    events: Mutex<Vec<SignupEvent>>,
}

impl CapturedFeed {
    /// Snapshot of the events published so far.
    pub fn events(&self) -> Vec<SignupEvent> {
        self.events.lock().expect("events lock").clone()
    }
}

impl LiveFeed for CapturedFeed {
    fn publish(&self, event: SignupEvent) {
        self.events.lock().expect("events lock").push(event);
    }
}

/// Mailer recording submissions, optionally refusing every message.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
    fail: bool,
}

impl RecordingMailer {
    /// A mailer whose relay refuses every message.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Messages accepted so far.
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().expect("sent lock").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> Result<MailReceipt, DeliveryFailure> {
        if self.fail {
            return Err(DeliveryFailure("relay refused connection".into()));
        }
        self.sent.lock().expect("sent lock").push(message.clone());
        Ok(MailReceipt {
            message_id: format!("<{}@mailer.test>", Uuid::new_v4()),
        })
    }
}
