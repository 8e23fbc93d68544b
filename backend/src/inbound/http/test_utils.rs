//! Shared harness for HTTP handler tests: real services over in-memory fakes.

use std::sync::Arc;

use actix_web::web;
use chrono::Utc;

use crate::domain::ports::IdentityStore;
use crate::domain::{
    DocumentService, MailService, ReferralService, RegistrationService, Role, StatsService, Uid,
    User,
};
use crate::inbound::http::state::HttpState;
use crate::test_support::{
    CapturedFeed, InMemoryDocumentStore, InMemoryIdentityStore, InMemoryObjectStorage,
    InMemoryReferralStore, RecordingMailer,
};

pub const TEST_HASH_COST: u32 = 4;

/// Handles onto the fakes behind a test [`HttpState`].
pub struct Harness {
    pub state: web::Data<HttpState>,
    pub identity: Arc<InMemoryIdentityStore>,
    pub storage: Arc<InMemoryObjectStorage>,
    pub feed: Arc<CapturedFeed>,
    pub mailer: Arc<RecordingMailer>,
}

/// A fully wired state over fresh in-memory fakes.
pub fn harness() -> Harness {
    harness_with_mailer(Arc::new(RecordingMailer::default()))
}

/// As [`harness`], but with a caller-supplied mailer fake.
pub fn harness_with_mailer(mailer: Arc<RecordingMailer>) -> Harness {
    let identity = Arc::new(InMemoryIdentityStore::default());
    let storage = Arc::new(InMemoryObjectStorage::default());
    let feed = Arc::new(CapturedFeed::default());
    let documents = Arc::new(InMemoryDocumentStore::default());
    let referrals = Arc::new(InMemoryReferralStore::default());

    let state = web::Data::new(HttpState {
        registration: Arc::new(RegistrationService::with_hash_cost(
            identity.clone(),
            feed.clone(),
            TEST_HASH_COST,
        )),
        documents: Arc::new(DocumentService::new(
            documents,
            identity.clone(),
            storage.clone(),
        )),
        referrals: Arc::new(ReferralService::new(referrals, identity.clone())),
        stats: Arc::new(StatsService::new(identity.clone())),
        mail: Arc::new(MailService::new(mailer.clone(), identity.clone())),
    });

    Harness {
        state,
        identity,
        storage,
        feed,
        mailer,
    }
}

/// Insert a user directly into the fake identity store.
pub async fn seed_user(identity: &InMemoryIdentityStore, email: &str) -> Uid {
    let user = User {
        uid: Uid::issue(),
        name: "Asha Rao".into(),
        email: email.into(),
        phone: "9876500000".into(),
        state: "Kerala".into(),
        password_hash: bcrypt::hash("s3cret", TEST_HASH_COST).expect("hashes"),
        role: Role::User,
        created_at: Utc::now(),
    };
    identity.insert_user(&user).await.expect("seeds user");
    user.uid
}
