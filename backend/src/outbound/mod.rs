//! Outbound adapters implementing the domain ports against real backends.

pub mod live;
pub mod mail;
pub mod persistence;
pub mod storage;

pub use live::BroadcastFeed;
pub use mail::SmtpMailer;
pub use storage::S3Storage;
