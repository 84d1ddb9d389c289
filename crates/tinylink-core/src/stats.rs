//! Stats view contract
//!
//! Fetches a single record and decides what the stats page shows. The only
//! branching here is status-driven: a 404-class failure reads "Link not
//! found", anything else reads as a generic failure.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::present::format_timestamp;
use crate::record::LinkRecord;
use crate::traits::LinkGateway;

/// Shown when the store has no record for the code
pub const NOT_FOUND_MESSAGE: &str = "Link not found";

/// Shown for any other fetch failure
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load stats";

/// Result of fetching stats for one code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsOutcome {
    /// Record fetched
    Found(LinkRecord),
    /// The store answered 404
    NotFound,
    /// Any other failure
    Failed,
}

impl StatsOutcome {
    /// Failure message, `None` when the record was found
    pub fn message(&self) -> Option<&'static str> {
        match self {
            StatsOutcome::Found(_) => None,
            StatsOutcome::NotFound => Some(NOT_FOUND_MESSAGE),
            StatsOutcome::Failed => Some(LOAD_FAILED_MESSAGE),
        }
    }

    /// Labelled rows for the stats card
    ///
    /// `short_base` is the origin used for the Short URL row. Empty for
    /// failure outcomes.
    pub fn rows(&self, short_base: &str) -> Vec<(&'static str, String)> {
        let StatsOutcome::Found(record) = self else {
            return Vec::new();
        };

        vec![
            ("Short Code", record.code.clone()),
            ("Short URL", record.short_url(short_base)),
            ("Target URL", record.target_url.clone()),
            ("Total Clicks", record.clicks.to_string()),
            ("Created At", format_timestamp(Some(record.created_at))),
            ("Last Clicked", format_timestamp(record.last_clicked)),
        ]
    }
}

/// Fetches per-link statistics through the gateway
///
/// Holds no state between fetches. Overlapping fetches are not cancelled;
/// whichever response the caller applies last is what it shows.
#[derive(Clone)]
pub struct StatsView {
    gateway: Arc<dyn LinkGateway>,
}

impl StatsView {
    /// Create a stats view over `gateway`
    pub fn new(gateway: Arc<dyn LinkGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch the record for `code`
    pub async fn fetch(&self, code: &str) -> StatsOutcome {
        debug!("Fetching stats for {}", code);
        match self.gateway.get_link(code).await {
            Ok(record) => StatsOutcome::Found(record),
            Err(e) if e.is_not_found() => StatsOutcome::NotFound,
            Err(e) => {
                warn!("Failed to load stats for {}: {}", code, e);
                StatsOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_rows_render_never_for_unclicked() {
        let outcome = StatsOutcome::Found(LinkRecord {
            code: "abc123".to_string(),
            target_url: "https://example.com".to_string(),
            clicks: 0,
            created_at: Utc::now(),
            last_clicked: None,
        });

        let rows = outcome.rows("http://localhost:5000");
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[1], ("Short URL", "http://localhost:5000/abc123".to_string()));
        assert_eq!(rows[3], ("Total Clicks", "0".to_string()));
        assert_eq!(rows[5], ("Last Clicked", "Never".to_string()));
        assert_eq!(outcome.message(), None);
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(StatsOutcome::NotFound.message(), Some("Link not found"));
        assert_eq!(StatsOutcome::Failed.message(), Some("Failed to load stats"));
        assert!(StatsOutcome::Failed.rows("http://x").is_empty());
    }
}
