//! Redirect resolver
//!
//! Turns a short code into a single navigation to `<redirect-base>/<code>`.
//! The redirect service does the lookup, counts the click and issues the HTTP
//! redirect; the resolver neither validates the code nor consults the
//! registry.
//!
//! ## Idempotency
//!
//! The resolved code is the idempotency key. Re-resolving the code that was
//! resolved last is a no-op, so a view that re-renders with an unchanged code
//! does not navigate twice. A different code navigates again.

use std::sync::Mutex;

use tracing::{debug, info};

use crate::traits::Navigator;

/// What a call to [`RedirectResolver::resolve`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Navigation was requested
    Navigated {
        /// URL handed to the navigator
        target: String,
    },
    /// `code` was already resolved; nothing happened
    AlreadyResolved,
}

/// Hands short codes off to the redirect service
pub struct RedirectResolver<N: Navigator> {
    /// Redirect service base URL, without trailing slash
    redirect_base: String,

    /// Performs the navigation side effect
    navigator: N,

    /// Last code navigated to
    last_code: Mutex<Option<String>>,
}

impl<N: Navigator> RedirectResolver<N> {
    /// Create a resolver targeting `redirect_base`
    pub fn new(redirect_base: impl Into<String>, navigator: N) -> Self {
        let redirect_base = redirect_base.into().trim_end_matches('/').to_string();
        Self {
            redirect_base,
            navigator,
            last_code: Mutex::new(None),
        }
    }

    /// Redirect target for `code`
    pub fn target_for(&self, code: &str) -> String {
        format!("{}/{}", self.redirect_base, code)
    }

    /// Navigate to the redirect service for `code`, once per distinct code
    pub fn resolve(&self, code: &str) -> ResolveOutcome {
        let mut last = self
            .last_code
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if last.as_deref() == Some(code) {
            debug!("Code {} already resolved, skipping navigation", code);
            return ResolveOutcome::AlreadyResolved;
        }

        let target = self.target_for(code);
        info!("Redirecting {} -> {}", code, target);
        self.navigator.navigate(&target);
        *last = Some(code.to_string());

        ResolveOutcome::Navigated { target }
    }

    /// The navigator this resolver drives
    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}
