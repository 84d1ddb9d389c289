// # tinylink-core
//
// Core library for the TinyLink short-link client.
//
// ## Architecture Overview
//
// The client is a read-mostly cache over a remote link store:
// - **LinkGateway**: Trait for the remote link store (create, list, fetch, delete, health)
// - **LinkRegistry**: In-memory authoritative view of link records, synchronized
//   through the gateway and exposing derived (filtered, sorted) views
// - **RedirectResolver**: Turns a short code into exactly one navigation to the
//   redirect service
// - **StatsView**: Fetches a single record and distinguishes "not found" from
//   other failures
//
// ## Design Principles
//
// 1. **Server-owned truth**: codes, clicks and timestamps are never invented locally
// 2. **Explicit state container**: consumers read through accessors, mutate only
//    through `load`/`create`/`remove`
// 3. **Single-shot gateway**: one request per operation, no retry, no caching
// 4. **Idempotent side effects**: the resolver navigates once per distinct code

pub mod config;
pub mod error;
pub mod present;
pub mod record;
pub mod registry;
pub mod resolver;
pub mod stats;
pub mod traits;

// Re-export core types for convenience
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use record::{HealthStatus, LinkRecord, NewLink};
pub use registry::{LinkRegistry, RegistryEvent, SortField, SortOrder, SortState, ViewQuery};
pub use resolver::{RedirectResolver, ResolveOutcome};
pub use stats::{StatsOutcome, StatsView};
pub use traits::{LinkGateway, Navigator};
