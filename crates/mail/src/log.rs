use aliasly_core::mail::{MailError, MailSender};
use async_trait::async_trait;

/// Mailer for development setups without an SMTP relay.
///
/// Logs recipient and subject only. The body carries the verification
/// token and is never written to the log.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl MailSender for LogMailer {
    async fn send(&self, to_address: &str, subject: &str, _body: &str) -> Result<(), MailError> {
        tracing::info!(to = to_address, subject, "SMTP not configured; mail not delivered");
        Ok(())
    }
}
