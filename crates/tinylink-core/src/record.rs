//! Link record types
//!
//! These mirror the wire shape of the remote link store:
//!
//! ```json
//! {
//!   "code": "abc123",
//!   "target_url": "https://example.com/some/long/path",
//!   "clicks": 4,
//!   "created_at": "2026-01-17T13:40:00Z",
//!   "last_clicked": null
//! }
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

/// Minimum length of a short code
pub const CODE_MIN_LEN: usize = 6;

/// Maximum length of a short code
pub const CODE_MAX_LEN: usize = 8;

/// A short-link record as owned by the remote store
///
/// The client never mutates a record in place. `clicks` and `last_clicked`
/// are only as fresh as the last fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Short code, unique across the store
    pub code: String,
    /// Absolute URL the code redirects to
    pub target_url: String,
    /// Number of redirects served so far
    #[serde(default)]
    pub clicks: u64,
    /// Creation time
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Time of the most recent redirect, `None` if never clicked
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub last_clicked: Option<DateTime<Utc>>,
}

impl LinkRecord {
    /// Full short URL for this record under `base` (e.g. `http://localhost:5000/abc123`)
    pub fn short_url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.code)
    }

    /// Whether the record matches a search term
    ///
    /// The term must already be lowercased. An empty term matches everything.
    pub(crate) fn matches(&self, lowered_term: &str) -> bool {
        lowered_term.is_empty()
            || self.code.to_lowercase().contains(lowered_term)
            || self.target_url.to_lowercase().contains(lowered_term)
    }
}

/// Create request body sent to the store
///
/// `custom_code` is always present on the wire; an empty string asks the
/// store to generate a code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLink {
    /// Absolute URL to shorten
    pub target_url: String,
    /// Requested code, or empty
    #[serde(default)]
    pub custom_code: String,
}

impl NewLink {
    /// Create a new request
    pub fn new(target_url: impl Into<String>, custom_code: Option<&str>) -> Self {
        Self {
            target_url: target_url.into(),
            custom_code: custom_code.unwrap_or_default().to_string(),
        }
    }

    /// The requested code, if one was given
    pub fn custom_code(&self) -> Option<&str> {
        Some(self.custom_code.as_str()).filter(|c| !c.is_empty())
    }
}

/// Parse an ISO-8601 timestamp
///
/// RFC 3339 (with offset) is tried first. Date-times without an offset and
/// bare dates are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 timestamp: {raw}")))
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 timestamp: {raw}"))),
        None => Ok(None),
    }
}

/// Whether `code` is 6-8 ASCII alphanumeric characters
pub fn is_valid_code(code: &str) -> bool {
    (CODE_MIN_LEN..=CODE_MAX_LEN).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Payload returned by the store's health probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Raw response body
    pub body: serde_json::Value,
}
