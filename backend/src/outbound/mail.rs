//! SMTP mailer adapter over lettre.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use uuid::Uuid;

use crate::domain::ports::{DeliveryFailure, MailMessage, MailReceipt, Mailer};
use crate::domain::Error;
use crate::server::config::MailConfig;

const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// [`Mailer`] backed by an async SMTP transport.
///
/// The Message-ID is generated locally before submission so the receipt can
/// carry it even though SMTP acknowledgements do not echo one back.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    id_domain: String,
}

impl SmtpMailer {
    /// Build the transport from relay configuration.
    ///
    /// # Errors
    /// Invalid relay host or sender address.
    pub fn new(config: &MailConfig) -> Result<Self, Error> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|err| Error::internal(format!("smtp relay setup failed: {err}")))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        let from: Mailbox = config
            .from
            .parse()
            .map_err(|err| Error::internal(format!("invalid sender address: {err}")))?;

        Ok(Self {
            transport,
            from,
            id_domain: config.host.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &MailMessage) -> Result<MailReceipt, DeliveryFailure> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|err| DeliveryFailure(format!("invalid recipient address: {err}")))?;

        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.id_domain);
        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone())
            .message_id(Some(message_id.clone()))
            .header(ContentType::TEXT_HTML)
            .body(message.html.clone())
            .map_err(|err| DeliveryFailure(format!("message assembly failed: {err}")))?;

        self.transport
            .send(email)
            .await
            .map_err(|err| DeliveryFailure(err.to_string()))?;
        Ok(MailReceipt { message_id })
    }
}
