//! Signed REST client for the OVH email-domain redirection API.
//!
//! Every call carries the application key, consumer key, a Unix timestamp
//! and a signature over the request:
//!
//! ```text
//! "$1$" + sha1_hex(secret + "+" + consumer + "+" + METHOD + "+" + url + "+" + body + "+" + timestamp)
//! ```

use aliasly_core::address::alias_address;
use aliasly_core::provider::{ForwardingProvider, ProviderError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use serde::Serialize;
use sha1::{Digest, Sha1};

use crate::config::{resolve_endpoint, OvhConfig};

/// Errors from the OVH REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum OvhError {
    #[error("Unknown OVH endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Invalid OVH request URL: {0}")]
    Url(String),

    #[error("Request body encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// OVH returned a non-2xx status code.
    #[error("OVH API error ({status}): {body}")]
    ApiError { status: u16, body: String },
}

impl From<OvhError> for ProviderError {
    fn from(err: OvhError) -> Self {
        match err {
            OvhError::ApiError { status, body } => ProviderError::Rejected { status, body },
            other => ProviderError::Unavailable(other.to_string()),
        }
    }
}

/// Body of `POST /email/domain/{domain}/redirection`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewRedirection<'a> {
    from: &'a str,
    to: &'a str,
    local_copy: bool,
}

/// Compute the `X-Ovh-Signature` header value.
pub fn sign(
    application_secret: &str,
    consumer_key: &str,
    method: &str,
    url: &str,
    body: &str,
    timestamp: &str,
) -> String {
    let payload =
        format!("{application_secret}+{consumer_key}+{method}+{url}+{body}+{timestamp}");
    let hash = Sha1::digest(payload.as_bytes());
    format!("$1${hash:x}")
}

/// HTTP client for the OVH API of one account.
pub struct OvhClient {
    client: reqwest::Client,
    api_url: String,
    application_key: String,
    application_secret: String,
    consumer_key: String,
}

impl OvhClient {
    pub fn new(config: &OvhConfig) -> Result<Self, OvhError> {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &OvhConfig) -> Result<Self, OvhError> {
        let api_url = resolve_endpoint(&config.endpoint)
            .ok_or_else(|| OvhError::UnknownEndpoint(config.endpoint.clone()))?;
        Ok(Self {
            client,
            api_url,
            application_key: config.application_key.clone(),
            application_secret: config.application_secret.clone(),
            consumer_key: config.consumer_key.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Create a redirection from `from` to `to` without a local copy.
    pub async fn create_redirection(
        &self,
        domain: &str,
        from: &str,
        to: &str,
    ) -> Result<(), OvhError> {
        let url = self.url(&format!("/email/domain/{domain}/redirection"), &[])?;
        let body = serde_json::to_string(&NewRedirection {
            from,
            to,
            local_copy: false,
        })?;

        let response = self.signed(Method::POST, url, body).await?;
        Self::check_status(response).await
    }

    /// IDs of the redirections whose source is `from`.
    pub async fn find_redirections(&self, domain: &str, from: &str) -> Result<Vec<String>, OvhError> {
        let url = self.url(
            &format!("/email/domain/{domain}/redirection"),
            &[("from", from)],
        )?;
        let response = self.signed(Method::GET, url, String::new()).await?;
        Self::parse_response(response).await
    }

    pub async fn delete_redirection(&self, domain: &str, id: &str) -> Result<(), OvhError> {
        let url = self.url(&format!("/email/domain/{domain}/redirection/{id}"), &[])?;
        let response = self.signed(Method::DELETE, url, String::new()).await?;
        Self::check_status(response).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, OvhError> {
        let raw = format!("{}{}", self.api_url, path);
        let parsed = if query.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, query)
        };
        parsed.map_err(|e| OvhError::Url(format!("{raw}: {e}")))
    }

    /// Send a request carrying the OVH authentication headers. An empty
    /// `body` is sent without a content type.
    async fn signed(
        &self,
        method: Method,
        url: Url,
        body: String,
    ) -> Result<reqwest::Response, OvhError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &self.application_secret,
            &self.consumer_key,
            method.as_str(),
            url.as_str(),
            &body,
            &timestamp,
        );

        let mut request = self
            .client
            .request(method, url)
            .header("X-Ovh-Application", &self.application_key)
            .header("X-Ovh-Consumer", &self.consumer_key)
            .header("X-Ovh-Timestamp", timestamp)
            .header("X-Ovh-Signature", signature);
        if !body.is_empty() {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        Ok(request.send().await?)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, OvhError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(OvhError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, OvhError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), OvhError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ForwardingProvider for OvhClient {
    async fn create_forwarding_rule(
        &self,
        domain: &str,
        prefix: &str,
        target_address: &str,
    ) -> Result<(), ProviderError> {
        let from = alias_address(prefix, domain);
        self.create_redirection(domain, &from, target_address).await?;
        tracing::info!(from = %from, "OVH redirection created");
        Ok(())
    }

    /// Remove every redirection from `prefix@domain`. Finding none is
    /// success.
    async fn delete_forwarding_rule(
        &self,
        domain: &str,
        prefix: &str,
    ) -> Result<(), ProviderError> {
        let from = alias_address(prefix, domain);
        let ids = self.find_redirections(domain, &from).await?;
        for id in &ids {
            self.delete_redirection(domain, id).await?;
        }
        tracing::info!(from = %from, removed = ids.len(), "OVH redirections deleted");
        Ok(())
    }
}
