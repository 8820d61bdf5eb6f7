/// Default API endpoint name when `OVH_ENDPOINT` is not set.
const DEFAULT_ENDPOINT: &str = "ovh-eu";

/// Credentials and endpoint for the OVH API.
#[derive(Debug, Clone)]
pub struct OvhConfig {
    /// Endpoint name (`ovh-eu`, `ovh-ca`, `ovh-us`) or a full base URL.
    pub endpoint: String,
    pub application_key: String,
    pub application_secret: String,
    pub consumer_key: String,
}

impl OvhConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless all three credentials are set.
    ///
    /// | Variable                 | Required | Default  |
    /// |--------------------------|----------|----------|
    /// | `OVH_ENDPOINT`           | no       | `ovh-eu` |
    /// | `OVH_APPLICATION_KEY`    | yes      |          |
    /// | `OVH_APPLICATION_SECRET` | yes      |          |
    /// | `OVH_CONSUMER_KEY`       | yes      |          |
    pub fn from_env() -> Option<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Some(Self {
            endpoint: var("OVH_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            application_key: var("OVH_APPLICATION_KEY")?,
            application_secret: var("OVH_APPLICATION_SECRET")?,
            consumer_key: var("OVH_CONSUMER_KEY")?,
        })
    }
}

/// Map an endpoint name to its API base URL.
///
/// Values starting with `http://` or `https://` are used as given, minus
/// any trailing `/`. Unknown names yield `None`.
pub fn resolve_endpoint(endpoint: &str) -> Option<String> {
    match endpoint {
        "ovh-eu" => Some("https://eu.api.ovh.com/1.0".to_string()),
        "ovh-ca" => Some("https://ca.api.ovh.com/1.0".to_string()),
        "ovh-us" => Some("https://api.us.ovhcloud.com/1.0".to_string()),
        url if url.starts_with("https://") || url.starts_with("http://") => {
            Some(url.trim_end_matches('/').to_string())
        }
        _ => None,
    }
}
