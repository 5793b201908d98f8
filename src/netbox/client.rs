//! NetBox HTTP client for API interactions

use log::debug;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::config::api;
use crate::error::{NbError, Result};
use crate::netbox::query::Query;
use crate::netbox::settings::Settings;

/// NetBox API client
///
/// Wraps a single `reqwest::Client` configured from the loaded settings.
/// Requests are issued one at a time; nothing is retried.
pub struct NetBoxClient {
    client: Client,
    settings: Settings,
}

impl NetBoxClient {
    /// Create a client honoring the timeout and TLS settings
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(settings.insecure)
            .build()?;

        Ok(Self { client, settings })
    }

    /// Settings this client was built from
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Full URL for an API path, always ending in `/`
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        compose_url(&self.settings.base_url, path, &Query::new())
    }

    /// Value of the `Authorization` header
    ///
    /// v2 tokens (`nbt_...`) use the Bearer scheme, legacy tokens use `Token`.
    fn auth_header(&self) -> String {
        auth_header_value(&self.settings.token)
    }

    /// GET an endpoint (or full URL) with the given query and decode the body
    pub async fn execute(&self, endpoint: &str, query: &Query) -> Result<Value> {
        let url = compose_url(&self.settings.base_url, endpoint, query)?;
        self.get_json(url).await
    }

    /// GET a fully composed URL and decode the body
    ///
    /// A success response whose body is not JSON comes back as a JSON string
    /// holding the raw text.
    pub async fn get_json(&self, url: Url) -> Result<Value> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!("Request failed with status {}", status.as_u16());
            return Err(NbError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(_) => {
                debug!("Response body is not JSON, returning raw text");
                Ok(Value::String(body))
            }
        }
    }
}

/// Authorization header value for a token
pub fn auth_header_value(token: &str) -> String {
    if token.starts_with(api::V2_TOKEN_PREFIX) {
        format!("Bearer {}", token)
    } else {
        format!("Token {}", token)
    }
}

/// Turn an API path into a URL string
///
/// Full `http(s)://` URLs pass through. Relative paths are placed under
/// `/api/`, unless they already start with `api/`.
pub fn build_url(base_url: &str, path: &str) -> String {
    let path = path.trim();
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    let cleaned = path.trim_start_matches('/');
    let prefix = format!("{}/", api::BASE_PATH);
    if cleaned.starts_with(&prefix) || cleaned == api::BASE_PATH {
        format!("{}/{}", base, cleaned)
    } else {
        format!("{}/{}/{}", base, api::BASE_PATH, cleaned)
    }
}

/// Make sure the URL path ends with `/`
pub fn ensure_trailing_slash(url: &mut Url) {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
}

/// Compose the final request URL: base + path + trailing slash + query
pub fn compose_url(base_url: &str, path: &str, query: &Query) -> Result<Url> {
    let raw = build_url(base_url, path);
    let mut url = Url::parse(&raw)
        .map_err(|e| NbError::InvalidArgument(format!("Invalid URL '{}': {}", raw, e)))?;
    ensure_trailing_slash(&mut url);

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query.pairs() {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

#[cfg(test)]
impl NetBoxClient {
    /// Create a test client against a mock server
    pub fn test_client(base_url: &str) -> Self {
        Self::new(Settings {
            base_url: base_url.to_string(),
            token: "test-token".to_string(),
            timeout: std::time::Duration::from_secs(5),
            insecure: false,
        })
        .expect("test client should build")
    }
}
