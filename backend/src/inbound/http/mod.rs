//! HTTP inbound adapter exposing the REST endpoints.

pub mod documents;
pub mod error;
pub mod health;
pub mod mail;
pub mod referrals;
pub mod state;
pub mod stats;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
