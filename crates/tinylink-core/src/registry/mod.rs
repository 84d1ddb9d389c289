//! Link registry
//!
//! The LinkRegistry is the client's authoritative in-memory view of link
//! records. It is responsible for:
//! - Hydrating from the gateway (`load`)
//! - Applying create/delete mutations after the gateway confirms them
//! - Deriving filtered and sorted views for display
//!
//! ## Architecture
//!
//! ```text
//!  ┌──────────────┐   load / create / remove   ┌──────────────┐
//!  │    Views     │ ─────────────────────────▶ │ LinkRegistry │
//!  │ (dashboard)  │ ◀───── view / links ────── │  (records)   │
//!  └──────────────┘                            └──────────────┘
//!                                                     │
//!                                                     ▼
//!                                              ┌──────────────┐
//!                                              │ LinkGateway  │
//!                                              └──────────────┘
//! ```
//!
//! ## Ordering
//!
//! Records keep the order the gateway returned them in. A freshly created
//! record is inserted at the head so no re-fetch is needed after creation.
//!
//! ## Concurrency
//!
//! `create` and `remove` share a pending-mutation guard. Overlapping
//! mutations on the same registry fail with [`Error::Busy`] instead of
//! interleaving. Loads are not guarded: the last response to arrive wins.

pub mod view;

pub use view::{SortField, SortOrder, SortState, ViewQuery};

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{Error, FETCH_FAILED, Result};
use crate::record::{LinkRecord, NewLink, is_valid_code};
use crate::traits::LinkGateway;

/// Shown when `create` is called without a target URL
pub const EMPTY_URL_MESSAGE: &str = "Please enter a URL";

/// Shown when a custom code is not 6-8 alphanumeric characters
pub const INVALID_CODE_MESSAGE: &str = "Custom code must be 6-8 alphanumeric characters";

/// Events emitted by the LinkRegistry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// Record set replaced from the gateway
    Loaded { count: usize },

    /// Load failed; previous records are still held
    LoadFailed { error: String },

    /// Record created and prepended
    Created { code: String },

    /// Create rejected (locally or by the store)
    CreateFailed { error: String },

    /// Record deleted on the store and dropped locally
    Removed { code: String },

    /// Delete rejected; record is still held
    RemoveFailed { code: String, error: String },
}

#[derive(Debug, Default)]
struct RegistryState {
    links: Vec<LinkRecord>,
    load_error: Option<String>,
    loaded: bool,
}

/// Client-side link registry
///
/// Consumers read through [`LinkRegistry::links`] and [`LinkRegistry::view`]
/// and mutate only through `load`, `create` and `remove`.
pub struct LinkRegistry {
    /// Remote link store
    gateway: Arc<dyn LinkGateway>,

    /// Records and status flags
    state: RwLock<RegistryState>,

    /// Set while a create or remove is in flight
    mutation_pending: AtomicBool,

    /// Event sender for external monitoring
    event_tx: mpsc::Sender<RegistryEvent>,
}

impl LinkRegistry {
    /// Create a new, empty registry
    ///
    /// # Returns
    ///
    /// A tuple of (registry, event_receiver) where event_receiver yields registry events
    pub fn new(
        gateway: Arc<dyn LinkGateway>,
        config: &ClientConfig,
    ) -> (Self, mpsc::Receiver<RegistryEvent>) {
        let (tx, rx) = mpsc::channel(config.event_channel_capacity.max(1));

        let registry = Self {
            gateway,
            state: RwLock::new(RegistryState::default()),
            mutation_pending: AtomicBool::new(false),
            event_tx: tx,
        };

        (registry, rx)
    }

    /// Replace local state with the gateway's current record set
    ///
    /// On failure the previous records are kept and [`LinkRegistry::load_error`]
    /// is set until the next successful load.
    pub async fn load(&self) -> Result<usize> {
        debug!("Loading links via {}", self.gateway.gateway_name());

        match self.gateway.list_links().await {
            Ok(records) => {
                let records = dedupe_by_code(records);
                let count = records.len();
                {
                    let mut state = self.state.write().await;
                    state.links = records;
                    state.load_error = None;
                    state.loaded = true;
                }
                info!("Loaded {} link(s)", count);
                self.emit_event(RegistryEvent::Loaded { count });
                Ok(count)
            }
            Err(e) => {
                warn!("Failed to fetch links: {}", e);
                self.state.write().await.load_error = Some(FETCH_FAILED.to_string());
                self.emit_event(RegistryEvent::LoadFailed {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Create a record and prepend it to local state
    ///
    /// Preconditions are checked before the gateway is contacted:
    /// - `target_url` must be non-empty (full URL validation is the store's job)
    /// - a non-empty `custom_code` must be 6-8 ASCII alphanumeric characters
    ///
    /// A store rejection (e.g. a code collision) is returned as-is and leaves
    /// local state untouched.
    pub async fn create(&self, target_url: &str, custom_code: Option<&str>) -> Result<LinkRecord> {
        let request = match validate_new_link(target_url, custom_code) {
            Ok(request) => request,
            Err(e) => {
                self.emit_event(RegistryEvent::CreateFailed {
                    error: e.to_string(),
                });
                return Err(e);
            }
        };

        let _guard = self.begin_mutation()?;

        match self.gateway.create_link(&request).await {
            Ok(record) => {
                {
                    let mut state = self.state.write().await;
                    state.links.retain(|r| r.code != record.code);
                    state.links.insert(0, record.clone());
                }
                info!("Created link {} -> {}", record.code, record.target_url);
                self.emit_event(RegistryEvent::Created {
                    code: record.code.clone(),
                });
                Ok(record)
            }
            Err(e) => {
                warn!("Create rejected: {}", e);
                self.emit_event(RegistryEvent::CreateFailed {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Delete a record on the store, then drop it locally
    ///
    /// Callers are expected to have confirmed the delete with the user. On
    /// failure the record stays in local state.
    pub async fn remove(&self, code: &str) -> Result<()> {
        let _guard = self.begin_mutation()?;

        match self.gateway.delete_link(code).await {
            Ok(()) => {
                let removed = {
                    let mut state = self.state.write().await;
                    let before = state.links.len();
                    state.links.retain(|r| r.code != code);
                    before - state.links.len()
                };
                if removed == 0 {
                    debug!("Deleted link {} was not held locally", code);
                }
                info!("Removed link {}", code);
                self.emit_event(RegistryEvent::Removed {
                    code: code.to_string(),
                });
                Ok(())
            }
            Err(e) => {
                warn!("Delete of {} rejected: {}", code, e);
                self.emit_event(RegistryEvent::RemoveFailed {
                    code: code.to_string(),
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Filtered and sorted view over current records
    ///
    /// Never mutates state.
    pub async fn view(&self, query: &ViewQuery) -> Vec<LinkRecord> {
        let state = self.state.read().await;
        view::apply(&state.links, query)
    }

    /// Snapshot of all records in registry order
    pub async fn links(&self) -> Vec<LinkRecord> {
        self.state.read().await.links.clone()
    }

    /// Look up a held record by code
    pub async fn get(&self, code: &str) -> Option<LinkRecord> {
        let state = self.state.read().await;
        state.links.iter().find(|r| r.code == code).cloned()
    }

    /// Whether a record with `code` is held
    pub async fn contains(&self, code: &str) -> bool {
        self.get(code).await.is_some()
    }

    /// Number of records held
    pub async fn len(&self) -> usize {
        self.state.read().await.links.len()
    }

    /// Whether no records are held
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.links.is_empty()
    }

    /// Error banner from the last failed load, cleared by a successful one
    pub async fn load_error(&self) -> Option<String> {
        self.state.read().await.load_error.clone()
    }

    /// Whether at least one load has succeeded
    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.loaded
    }

    /// Whether a create or remove is in flight
    pub fn is_mutation_pending(&self) -> bool {
        self.mutation_pending.load(Ordering::SeqCst)
    }

    fn begin_mutation(&self) -> Result<MutationGuard<'_>> {
        if self
            .mutation_pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::busy("Another link operation is still in progress"));
        }
        Ok(MutationGuard {
            flag: &self.mutation_pending,
        })
    }

    /// Emit a registry event
    fn emit_event(&self, event: RegistryEvent) {
        // A full or closed channel drops the event; state is unaffected
        if self.event_tx.try_send(event).is_err() {
            warn!("Event channel full or closed, dropping registry event");
        }
    }
}

/// Releases the pending-mutation flag when the mutation settles
struct MutationGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for MutationGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Check create preconditions without touching the network
///
/// Whitespace only counts for the emptiness check; the URL is sent as given.
pub fn validate_new_link(target_url: &str, custom_code: Option<&str>) -> Result<NewLink> {
    if target_url.trim().is_empty() {
        return Err(Error::validation(EMPTY_URL_MESSAGE));
    }

    let custom_code = custom_code.filter(|c| !c.is_empty());
    if let Some(code) = custom_code
        && !is_valid_code(code)
    {
        return Err(Error::validation(INVALID_CODE_MESSAGE));
    }

    Ok(NewLink::new(target_url, custom_code))
}

fn dedupe_by_code(records: Vec<LinkRecord>) -> Vec<LinkRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| {
            let fresh = seen.insert(r.code.clone());
            if !fresh {
                warn!("Store returned duplicate code {}, keeping first", r.code);
            }
            fresh
        })
        .collect()
}
