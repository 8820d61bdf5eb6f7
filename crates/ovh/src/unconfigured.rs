use aliasly_core::provider::{ForwardingProvider, ProviderError};
use async_trait::async_trait;

const MESSAGE: &str = "OVH credentials are not configured";

/// Stand-in provider used when no OVH credentials are present.
#[derive(Debug, Default, Clone)]
pub struct UnconfiguredProvider;

#[async_trait]
impl ForwardingProvider for UnconfiguredProvider {
    async fn create_forwarding_rule(
        &self,
        _domain: &str,
        _prefix: &str,
        _target_address: &str,
    ) -> Result<(), ProviderError> {
        Err(ProviderError::Unavailable(MESSAGE.to_string()))
    }

    async fn delete_forwarding_rule(
        &self,
        _domain: &str,
        _prefix: &str,
    ) -> Result<(), ProviderError> {
        Err(ProviderError::Unavailable(MESSAGE.to_string()))
    }
}
