//! Outbound notification mail.
//!
//! [`Mailer`] is the seam between the contact pipeline and delivery. The
//! production implementation speaks SMTP through lettre; tests substitute a
//! recording double. A transactional-mail API would be just another
//! implementation of the same trait.
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
    message::{Mailbox, Message, MultiPart},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::config::SmtpConfig;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// Rendered notification, ready for any delivery backend.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Submitter address; replies from the owner's mail client go here.
    pub reply_to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), MailError>;
}

#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    /// Owner mailbox, used as both sender and recipient.
    mailbox: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| MailError::Smtp(e.to_string()))?
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .build();

        let mailbox = config
            .user
            .parse::<Mailbox>()
            .map_err(|e| MailError::InvalidAddress(e.to_string()))?;

        Ok(Self { transport, mailbox })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<(), MailError> {
        let reply_to = notification
            .reply_to
            .parse::<Mailbox>()
            .map_err(|e| MailError::InvalidAddress(e.to_string()))?;

        let message = Message::builder()
            .from(self.mailbox.clone())
            .to(self.mailbox.clone())
            .reply_to(reply_to)
            .subject(notification.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                notification.text.clone(),
                notification.html.clone(),
            ))
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        Ok(())
    }
}
