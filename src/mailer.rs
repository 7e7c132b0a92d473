// src/mailer.rs
//! Outbound email over SMTP with STARTTLS

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;
use tracing::info;

use crate::core::config_manager::SmtpConfig;
use crate::error::{OutreachError, OutreachResult};

/// User-supplied login for the mail relay; the email doubles as the From address
#[derive(Clone, Deserialize)]
pub struct SenderCredentials {
    pub email: String,
    pub password: String,
}

impl SenderCredentials {
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for SenderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SenderCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, sender: &SenderCredentials, email: &OutgoingEmail) -> OutreachResult<()>;
}

pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Plain-text message from the sender to the recipient
    pub fn build_message(sender: &SenderCredentials, email: &OutgoingEmail) -> OutreachResult<Message> {
        let from: Mailbox = sender
            .email
            .trim()
            .parse()
            .map_err(|e| OutreachError::Delivery(format!("Invalid sender address: {}", e)))?;
        let to: Mailbox = email
            .recipient
            .trim()
            .parse()
            .map_err(|e| OutreachError::Delivery(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| OutreachError::Delivery(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, sender: &SenderCredentials, email: &OutgoingEmail) -> OutreachResult<()> {
        let message = Self::build_message(sender, email)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
            .map_err(|e| OutreachError::Delivery(format!("Invalid SMTP relay: {}", e)))?
            .port(self.config.port)
            .credentials(Credentials::new(
                sender.email.trim().to_string(),
                sender.password.clone(),
            ))
            .build();

        transport
            .send(message)
            .await
            .map_err(|e| OutreachError::Delivery(e.to_string()))?;

        info!("Email sent to {} via {}", email.recipient, self.config.host);
        Ok(())
    }
}
