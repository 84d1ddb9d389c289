//! Test doubles and common utilities for contract tests
//!
//! The mock gateway is scripted: each operation returns a canned result and
//! counts how often it was called, so tests can assert both on registry state
//! and on whether the network would have been touched.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tinylink_core::error::{Error, Result};
use tinylink_core::record::{HealthStatus, LinkRecord, NewLink};
use tinylink_core::traits::{LinkGateway, Navigator};
use tokio::sync::Notify;

/// How a scripted operation should fail
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    /// 404 response
    NotFound,
    /// Non-2xx response with a message
    Status(u16, &'static str),
    /// No response at all
    Transport,
}

impl Failure {
    fn to_error(self, code: &str) -> Error {
        match self {
            Failure::NotFound => Error::not_found(format!("Link not found: {code}")),
            Failure::Status(status, message) => Error::gateway(status, message),
            Failure::Transport => Error::transport("connection refused"),
        }
    }
}

/// A scripted LinkGateway that tracks calls
#[derive(Clone, Default)]
pub struct MockLinkGateway {
    list_result: Arc<Mutex<Vec<LinkRecord>>>,
    list_failure: Arc<Mutex<Option<Failure>>>,
    create_failure: Arc<Mutex<Option<Failure>>>,
    delete_failure: Arc<Mutex<Option<Failure>>>,
    get_failure: Arc<Mutex<Option<Failure>>>,
    /// When set, create/delete wait for `release` before answering
    hold_mutations: Arc<AtomicBool>,
    release: Arc<Notify>,
    entered: Arc<Notify>,
    list_calls: Arc<AtomicUsize>,
    create_calls: Arc<AtomicUsize>,
    get_calls: Arc<AtomicUsize>,
    delete_calls: Arc<AtomicUsize>,
    created: Arc<Mutex<Vec<NewLink>>>,
}

impl MockLinkGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway whose list returns `records`
    pub fn with_links(records: Vec<LinkRecord>) -> Self {
        let gateway = Self::new();
        gateway.set_links(records);
        gateway
    }

    pub fn set_links(&self, records: Vec<LinkRecord>) {
        *self.list_result.lock().unwrap() = records;
    }

    pub fn fail_list(&self, failure: Option<Failure>) {
        *self.list_failure.lock().unwrap() = failure;
    }

    pub fn fail_create(&self, failure: Option<Failure>) {
        *self.create_failure.lock().unwrap() = failure;
    }

    pub fn fail_delete(&self, failure: Option<Failure>) {
        *self.delete_failure.lock().unwrap() = failure;
    }

    pub fn fail_get(&self, failure: Option<Failure>) {
        *self.get_failure.lock().unwrap() = failure;
    }

    /// Make create/delete block until [`MockLinkGateway::release_mutation`]
    pub fn hold_mutations(&self) {
        self.hold_mutations.store(true, Ordering::SeqCst);
    }

    /// Let subsequent create/delete calls answer immediately again
    pub fn stop_holding(&self) {
        self.hold_mutations.store(false, Ordering::SeqCst);
    }

    /// Wait until a held mutation has reached the gateway
    pub async fn mutation_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release_mutation(&self) {
        self.release.notify_one();
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// Create requests received, in order
    pub fn created_requests(&self) -> Vec<NewLink> {
        self.created.lock().unwrap().clone()
    }

    async fn maybe_hold(&self) {
        if self.hold_mutations.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
    }
}

#[async_trait::async_trait]
impl LinkGateway for MockLinkGateway {
    async fn create_link(&self, request: &NewLink) -> Result<LinkRecord> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.created.lock().unwrap().push(request.clone());
        self.maybe_hold().await;

        let code = request
            .custom_code()
            .map(str::to_string)
            .unwrap_or_else(|| format!("gen{:03}", self.create_calls()));

        if let Some(failure) = *self.create_failure.lock().unwrap() {
            return Err(failure.to_error(&code));
        }

        Ok(LinkRecord {
            code,
            target_url: request.target_url.clone(),
            clicks: 0,
            created_at: Utc::now(),
            last_clicked: None,
        })
    }

    async fn list_links(&self) -> Result<Vec<LinkRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = *self.list_failure.lock().unwrap() {
            return Err(failure.to_error(""));
        }
        Ok(self.list_result.lock().unwrap().clone())
    }

    async fn get_link(&self, code: &str) -> Result<LinkRecord> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = *self.get_failure.lock().unwrap() {
            return Err(failure.to_error(code));
        }
        self.list_result
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.code == code)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Link not found: {code}")))
    }

    async fn delete_link(&self, code: &str) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_hold().await;
        if let Some(failure) = *self.delete_failure.lock().unwrap() {
            return Err(failure.to_error(code));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        Ok(HealthStatus {
            body: serde_json::json!({ "ok": true }),
        })
    }

    fn gateway_name(&self) -> &'static str {
        "mock"
    }
}

/// A Navigator that records every target it is handed
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    targets: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }

    pub fn navigation_count(&self) -> usize {
        self.targets.lock().unwrap().len()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &str) {
        self.targets.lock().unwrap().push(target.to_string());
    }
}

/// Fixed timestamp `minutes` after 2026-01-01T00:00:00Z
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
}

/// Build a record
pub fn link(code: &str, target_url: &str, clicks: u64, last_clicked: Option<i64>) -> LinkRecord {
    LinkRecord {
        code: code.to_string(),
        target_url: target_url.to_string(),
        clicks,
        created_at: at(0),
        last_clicked: last_clicked.map(at),
    }
}

/// A small, mixed record set in store order
pub fn sample_links() -> Vec<LinkRecord> {
    vec![
        link("abc123", "https://example.com/docs", 12, Some(30)),
        link("Zeta99", "https://rust-lang.org", 3, None),
        link("docs01", "https://docs.rs/tokio", 40, Some(10)),
        link("qwerty", "https://news.example.org", 0, None),
    ]
}
