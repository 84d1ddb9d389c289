// # HTTP Link Gateway
//
// This crate provides the HTTP implementation of `LinkGateway` for the
// TinyLink client.
//
// ## Behavior
//
// - ✅ One HTTP request per operation
// - ✅ Request timeout configured from `ClientConfig::timeout_secs`
// - ✅ Status-driven error mapping (404 → NotFound, other non-2xx → Gateway)
// - ✅ Server `error` messages surfaced verbatim (e.g. code collisions)
// - ❌ NO retry logic (belongs to an outer resilience layer)
// - ❌ NO caching (the registry is the client-side cache)
// - ❌ NO background tasks
//
// ## API Reference
//
// - Create: POST `/api/links` `{target_url, custom_code}` → 201
// - List: GET `/api/links` → 200
// - Fetch: GET `/api/links/{code}` → 200 | 404
// - Delete: DELETE `/api/links/{code}` → 200 | 204
// - Health: GET `/healthz`

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tinylink_core::record::{HealthStatus, LinkRecord, NewLink};
use tinylink_core::traits::LinkGateway;
use tinylink_core::{ClientConfig, Error, Result};

/// Default HTTP timeout for API requests (10 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Error body returned by the store on rejected requests
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// HTTP gateway to the remote link store
#[derive(Debug, Clone)]
pub struct HttpLinkGateway {
    /// Store base URL, without trailing slash
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl HttpLinkGateway {
    /// Create a gateway for the store at `base_url`
    ///
    /// # Parameters
    ///
    /// - `base_url`: Store base URL (e.g. "http://localhost:5000")
    /// - `timeout`: Per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::config("Link store URL cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    /// Create a gateway with the default timeout
    pub fn with_default_timeout(base_url: impl Into<String>) -> Result<Self> {
        Self::new(base_url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a gateway from client configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.api_url, Duration::from_secs(config.timeout_secs))
    }

    /// Store base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn links_url(&self) -> String {
        format!("{}/api/links", self.base_url)
    }

    fn link_url(&self, code: &str) -> String {
        format!("{}/api/links/{}", self.base_url, code)
    }
}

/// Map a transport failure (no response received)
fn transport_error(op: &str, err: reqwest::Error) -> Error {
    Error::transport(format!("{} request failed: {}", op, err))
}

/// Pass 2xx responses through and map everything else onto the error taxonomy
///
/// `subject` names what was asked for and is used in the not-found message.
async fn check_status(response: Response, subject: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_default();

    tracing::debug!("Link store answered {} for {}: {}", status, subject, text);

    match status {
        StatusCode::NOT_FOUND => Err(Error::not_found(if message.is_empty() {
            format!("Link not found: {}", subject)
        } else {
            message
        })),
        _ => Err(Error::gateway(status.as_u16(), message)),
    }
}

/// Decode a JSON body; a malformed body maps to `Error::Json`
async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let body = response
        .bytes()
        .await
        .map_err(|e| transport_error("read", e))?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl LinkGateway for HttpLinkGateway {
    async fn create_link(&self, request: &NewLink) -> Result<LinkRecord> {
        tracing::debug!(
            "POST {} (custom code: {})",
            self.links_url(),
            request.custom_code().unwrap_or("<generated>")
        );

        let response = self
            .client
            .post(self.links_url())
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error("create", e))?;

        let response = check_status(response, &request.target_url).await?;
        decode(response).await
    }

    async fn list_links(&self) -> Result<Vec<LinkRecord>> {
        tracing::debug!("GET {}", self.links_url());

        let response = self
            .client
            .get(self.links_url())
            .send()
            .await
            .map_err(|e| transport_error("list", e))?;

        let response = check_status(response, "link list").await?;
        decode(response).await
    }

    async fn get_link(&self, code: &str) -> Result<LinkRecord> {
        tracing::debug!("GET {}", self.link_url(code));

        let response = self
            .client
            .get(self.link_url(code))
            .send()
            .await
            .map_err(|e| transport_error("fetch", e))?;

        let response = check_status(response, code).await?;
        decode(response).await
    }

    async fn delete_link(&self, code: &str) -> Result<()> {
        tracing::debug!("DELETE {}", self.link_url(code));

        let response = self
            .client
            .delete(self.link_url(code))
            .send()
            .await
            .map_err(|e| transport_error("delete", e))?;

        check_status(response, code).await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        let url = format!("{}/healthz", self.base_url);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error("health", e))?;

        let response = check_status(response, "health").await?;
        let text = response
            .text()
            .await
            .map_err(|e| transport_error("health", e))?;

        // Plain-text probes are wrapped rather than rejected
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
        Ok(HealthStatus { body })
    }

    fn gateway_name(&self) -> &'static str {
        "http"
    }
}
