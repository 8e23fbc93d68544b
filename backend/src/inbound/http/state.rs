//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data`, so routes depend
//! only on domain services and stay testable against in-memory fakes.

use std::sync::Arc;

use crate::domain::{
    DocumentService, MailService, ReferralService, RegistrationService, StatsService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<RegistrationService>,
    pub documents: Arc<DocumentService>,
    pub referrals: Arc<ReferralService>,
    pub stats: Arc<StatsService>,
    pub mail: Arc<MailService>,
}
