//! Domain ports for the hexagonal boundary.

mod document_store;
mod identity_store;
mod live_feed;
mod mailer;
mod object_storage;
mod referral_store;

pub use document_store::{DocumentStore, DocumentStoreError};
pub use identity_store::{IdentityStore, IdentityStoreError};
pub use live_feed::LiveFeed;
pub use mailer::{DeliveryFailure, MailMessage, MailReceipt, Mailer};
pub use object_storage::{ObjectStorage, ObjectStorageError};
pub use referral_store::{ReferralStore, ReferralStoreError};
