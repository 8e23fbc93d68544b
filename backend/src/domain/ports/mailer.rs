//! Driven port for the transactional mail relay.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::Error;

/// A transactional email handed to the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Relay acknowledgement returned to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MailReceipt {
    /// Message identifier assigned at submission.
    pub message_id: String,
}

/// Delivery failures (network, auth, SMTP). Not retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mail delivery failed: {0}")]
pub struct DeliveryFailure(pub String);

impl From<DeliveryFailure> for Error {
    fn from(err: DeliveryFailure) -> Self {
        Error::delivery(err.to_string())
    }
}

/// Port for sending transactional email.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Submit the message to the relay. No retry on failure.
    async fn send(&self, message: &MailMessage) -> Result<MailReceipt, DeliveryFailure>;
}
