// # Link Gateway Trait
//
// Defines the interface to the remote link store.
//
// ## Implementations
//
// - HTTP: `tinylink-gateway-http` crate
//
// ## Usage
//
// ```rust,ignore
// use tinylink_core::{LinkGateway, NewLink};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let gateway = /* LinkGateway implementation */;
//
//     let record = gateway
//         .create_link(&NewLink::new("https://example.com", None))
//         .await?;
//     println!("created {}", record.code);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::record::{HealthStatus, LinkRecord, NewLink};

/// Trait for link store gateways
///
/// Each method is a single request/response round trip.
///
/// ## Allowed
/// - Shape the request and parse the response
/// - Map response statuses onto [`crate::Error`]
///
/// ## Not Allowed
/// - Retry or back off (belongs to an outer resilience layer, if any)
/// - Cache responses (the registry is the client-side cache)
/// - Validate codes or URLs beyond what the wire format requires
/// - Spawn background tasks
///
/// # Error Mapping
///
/// - 404-class response → [`crate::Error::NotFound`]
/// - any other non-2xx → [`crate::Error::Gateway`] with the status and the
///   server's `error` message when present
/// - no response at all → [`crate::Error::Gateway`] with `status: None`
#[async_trait]
pub trait LinkGateway: Send + Sync {
    /// Create a record
    ///
    /// `POST /api/links` with `{target_url, custom_code}`, expecting `201`.
    /// A code collision comes back as a [`crate::Error::Gateway`] carrying the
    /// store's message.
    async fn create_link(&self, request: &NewLink) -> Result<LinkRecord, crate::Error>;

    /// List all records, in the order the store returns them
    ///
    /// `GET /api/links`
    async fn list_links(&self) -> Result<Vec<LinkRecord>, crate::Error>;

    /// Fetch a single record
    ///
    /// `GET /api/links/{code}`
    async fn get_link(&self, code: &str) -> Result<LinkRecord, crate::Error>;

    /// Delete a record
    ///
    /// `DELETE /api/links/{code}`, expecting `200` or `204`
    async fn delete_link(&self, code: &str) -> Result<(), crate::Error>;

    /// Probe the store's health endpoint
    ///
    /// `GET /healthz`. Used by operational tooling only.
    async fn health_check(&self) -> Result<HealthStatus, crate::Error>;

    /// Gateway name (for logging/debugging)
    fn gateway_name(&self) -> &'static str;
}
