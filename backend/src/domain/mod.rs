//! Domain layer: entities, ports, and the services that orchestrate them.
//!
//! Everything here is transport-agnostic. Inbound adapters translate HTTP
//! and WebSocket traffic into calls on these services; outbound adapters
//! implement the port traits against MongoDB, S3, and SMTP.

pub mod admin;
pub mod document;
pub mod documents;
pub mod error;
pub mod events;
pub mod mail;
pub mod password;
pub mod ports;
pub mod referral;
pub mod referrals;
pub mod registration;
pub mod stats;
pub mod statistics;
pub mod user;
pub mod validate;

pub use admin::{Admin, PublicAdmin};
pub use document::{
    DocumentEntry, DocumentOwner, OwnedDocuments, SignedDocument, UploadedFile, UserDocuments,
};
pub use documents::{DocumentService, DEFAULT_PRESIGN_TTL};
pub use error::{Error, ErrorCode};
pub use events::SignupEvent;
pub use mail::MailService;
pub use referral::{Contact, Referral};
pub use referrals::ReferralService;
pub use registration::{AuthenticatedAccount, NewAdmin, NewUser, RegistrationService};
pub use stats::{DashboardCounters, DashboardStats, RecentUser};
pub use statistics::StatsService;
pub use user::{PublicUser, Role, Uid, User};
