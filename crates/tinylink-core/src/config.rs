//! Configuration types for the TinyLink client

use serde::{Deserialize, Serialize};
use url::Url;

/// Default base URL of the link store
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Client configuration
///
/// The link store and the redirect service are usually the same backend, so
/// `redirect_url` and `short_url_base` fall back to `api_url` when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the remote link store
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base URL of the redirect service (`<redirect_url>/<code>`)
    #[serde(default)]
    pub redirect_url: Option<String>,

    /// Origin used when displaying short URLs
    #[serde(default)]
    pub short_url_base: Option<String>,

    /// Per-request timeout (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Capacity of the registry event channel
    ///
    /// When full, new events are dropped with a warning log.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            api_url: default_api_url(),
            redirect_url: None,
            short_url_base: None,
            timeout_secs: default_timeout_secs(),
            event_channel_capacity: default_event_channel_capacity(),
        }
    }

    /// Set the link store URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the redirect service URL
    pub fn with_redirect_url(mut self, redirect_url: impl Into<String>) -> Self {
        self.redirect_url = Some(redirect_url.into());
        self
    }

    /// Set the origin used for displayed short URLs
    pub fn with_short_url_base(mut self, base: impl Into<String>) -> Self {
        self.short_url_base = Some(base.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Effective redirect service base URL
    pub fn redirect_base(&self) -> &str {
        self.redirect_url.as_deref().unwrap_or(&self.api_url)
    }

    /// Effective origin for displayed short URLs
    pub fn short_base(&self) -> &str {
        self.short_url_base
            .as_deref()
            .unwrap_or_else(|| self.redirect_base())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        validate_base_url("api_url", &self.api_url)?;
        if let Some(ref url) = self.redirect_url {
            validate_base_url("redirect_url", url)?;
        }
        if let Some(ref url) = self.short_url_base {
            validate_base_url("short_url_base", url)?;
        }

        if !(1..=300).contains(&self.timeout_secs) {
            return Err(crate::Error::config(format!(
                "timeout_secs must be between 1 and 300. Got: {}",
                self.timeout_secs
            )));
        }

        if self.event_channel_capacity == 0 {
            return Err(crate::Error::config("event_channel_capacity must be > 0"));
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_base_url(field: &str, value: &str) -> Result<(), crate::Error> {
    if value.is_empty() {
        return Err(crate::Error::config(format!("{field} cannot be empty")));
    }

    let url = Url::parse(value)
        .map_err(|e| crate::Error::config(format!("{field} is not a valid URL ({e}): {value}")))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(crate::Error::config(format!(
            "{field} must use HTTP or HTTPS scheme. Got: {other}"
        ))),
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_event_channel_capacity() -> usize {
    100
}
