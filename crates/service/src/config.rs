/// Default alias domain when `ALIAS_DOMAIN` is not set.
const DEFAULT_ALIAS_DOMAIN: &str = "aliasme.ovh";

/// Default public base URL when `BASE_URL` is not set.
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Immutable configuration handed to [`crate::EmailService`] at construction.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Domain every alias address is minted under (`prefix@alias_domain`).
    pub alias_domain: String,
    /// Public base URL used to build verification links.
    pub base_url: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var        | Default                 |
    /// |----------------|-------------------------|
    /// | `ALIAS_DOMAIN` | `aliasme.ovh`           |
    /// | `BASE_URL`     | `http://localhost:3000` |
    pub fn from_env() -> Self {
        Self {
            alias_domain: std::env::var("ALIAS_DOMAIN")
                .unwrap_or_else(|_| DEFAULT_ALIAS_DOMAIN.into()),
            base_url: std::env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
        }
    }

    /// Link the user opens to verify an address.
    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/verify?token={token}", self.base_url.trim_end_matches('/'))
    }
}
