//! External alias-hosting provider contract.

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider could not be reached or is not configured.
    #[error("alias provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with a non-success status.
    #[error("alias provider rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Hosts the forwarding rules that make `prefix@domain` deliver to a target.
///
/// Calls block the caller for the full round trip; implementations apply
/// no retry.
#[async_trait]
pub trait ForwardingProvider: Send + Sync {
    async fn create_forwarding_rule(
        &self,
        domain: &str,
        prefix: &str,
        target_address: &str,
    ) -> Result<(), ProviderError>;

    async fn delete_forwarding_rule(&self, domain: &str, prefix: &str)
        -> Result<(), ProviderError>;
}
