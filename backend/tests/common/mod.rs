//! Shared harness wiring the real router over in-memory fakes.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;

use backend::domain::ports::LiveFeed;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::inbound::ws::state::WsState;
use backend::outbound::BroadcastFeed;
use backend::server::{build_http_state, AppContext};
use backend::test_support::{
    InMemoryDocumentStore, InMemoryIdentityStore, InMemoryObjectStorage, InMemoryReferralStore,
    RecordingMailer,
};

pub struct TestParts {
    pub http_state: web::Data<HttpState>,
    pub ws_state: web::Data<WsState>,
    pub health_state: web::Data<HealthState>,
    pub identity: Arc<InMemoryIdentityStore>,
    pub storage: Arc<InMemoryObjectStorage>,
    pub mailer: Arc<RecordingMailer>,
}

pub fn test_parts() -> TestParts {
    let identity = Arc::new(InMemoryIdentityStore::default());
    let storage = Arc::new(InMemoryObjectStorage::default());
    let mailer = Arc::new(RecordingMailer::default());
    let context = AppContext {
        identity: identity.clone(),
        documents: Arc::new(InMemoryDocumentStore::default()),
        referrals: Arc::new(InMemoryReferralStore::default()),
        storage: storage.clone(),
        mailer: mailer.clone(),
    };

    let ws_state = web::Data::new(WsState::new());
    let feed: Arc<dyn LiveFeed> = Arc::new(BroadcastFeed::new(ws_state.sender()));
    let http_state = web::Data::new(build_http_state(
        &context,
        feed,
        Duration::from_secs(300),
    ));

    TestParts {
        http_state,
        ws_state,
        health_state: web::Data::new(HealthState::new()),
        identity,
        storage,
        mailer,
    }
}
