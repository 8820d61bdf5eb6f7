//! Outbound mail contract.

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid mail address: {0}")]
    Address(String),

    #[error("mail delivery failed: {0}")]
    Delivery(String),
}

/// Sends a single plain-text message. No retry.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, to_address: &str, subject: &str, body: &str) -> Result<(), MailError>;
}
