//! Shared API availability signal.
//!
//! [`ApiStatus`] is a cheap cloneable handle. Only the API client writes to it (the writer
//! methods are crate-private); the presentation layer reads snapshots. Nothing in the
//! client consults it before dispatching, so a failed call never blocks the next one.
//!
//! Every attempt clears the last error before it is dispatched, then records its own
//! outcome: success marks the API reachable, failure marks it unavailable and stores the
//! message.

use parking_lot::RwLock;
use std::sync::Arc;

/// Point-in-time view of the availability signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiHealth {
    pub available: bool,
    pub last_error: Option<String>,
}

impl Default for ApiHealth {
    fn default() -> Self {
        Self {
            available: true,
            last_error: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApiStatus {
    inner: Arc<RwLock<ApiHealth>>,
}

impl ApiStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ApiHealth {
        self.inner.read().clone()
    }

    pub fn is_available(&self) -> bool {
        self.inner.read().available
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.read().last_error.clone()
    }

    pub(crate) fn begin_attempt(&self) {
        self.inner.write().last_error = None;
    }

    pub(crate) fn record_success(&self) {
        let mut health = self.inner.write();
        health.available = true;
        health.last_error = None;
    }

    pub(crate) fn record_failure(&self, message: impl Into<String>) {
        let mut health = self.inner.write();
        health.available = false;
        health.last_error = Some(message.into());
    }
}
