//! MongoDB-backed store adapters.

pub mod mongo;
pub mod mongo_documents;
pub mod mongo_identity;
pub mod mongo_referrals;

pub use mongo::connect;
pub use mongo_documents::MongoDocumentStore;
pub use mongo_identity::MongoIdentityStore;
pub use mongo_referrals::MongoReferralStore;
