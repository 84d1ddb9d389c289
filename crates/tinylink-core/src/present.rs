//! Display helpers shared by the dashboard and stats views

use chrono::{DateTime, Local, Utc};

/// Shown for a record that has never been clicked
pub const NEVER: &str = "Never";

/// Default width of the target column in the link table
pub const DEFAULT_URL_WIDTH: usize = 40;

/// Render a timestamp in local time, or "Never" for `None`
pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => NEVER.to_string(),
    }
}

/// Shorten `url` to `max` characters followed by `...`
pub fn truncate_url(url: &str, max: usize) -> String {
    match url.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &url[..idx]),
        None => url.to_string(),
    }
}
