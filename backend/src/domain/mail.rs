//! Transactional mail dispatch for pre-signup OTP delivery.

use std::sync::Arc;

use crate::domain::error::Error;
use crate::domain::ports::{IdentityStore, MailMessage, MailReceipt, Mailer};
use crate::domain::validate::require_present;

/// Domain service guarding the mail relay.
///
/// This path delivers pre-signup one-time codes, so it refuses recipients
/// that are already registered users.
pub struct MailService {
    mailer: Arc<dyn Mailer>,
    identity: Arc<dyn IdentityStore>,
}

impl MailService {
    /// Construct from injected gateway and store handles.
    pub fn new(mailer: Arc<dyn Mailer>, identity: Arc<dyn IdentityStore>) -> Self {
        Self { mailer, identity }
    }

    /// Relay a transactional email, returning the gateway receipt unchanged.
    ///
    /// # Errors
    /// - invalid request when a field is blank
    /// - conflict when the recipient is already a registered user
    /// - delivery error when the relay refuses the message (no retry)
    pub async fn send(&self, message: MailMessage) -> Result<MailReceipt, Error> {
        require_present("to", &message.to)?;
        require_present("subject", &message.subject)?;
        require_present("html", &message.html)?;

        if self
            .identity
            .find_user_by_email(&message.to)
            .await?
            .is_some()
        {
            return Err(Error::conflict("User already exists"));
        }

        Ok(self.mailer.send(&message).await?)
    }
}
