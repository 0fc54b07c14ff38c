//! Sliding-window rate limiting for login attempts.
//!
//! State is in-memory and per-process: a restart forgives all failures,
//! which is acceptable for a single-instance admin surface. Identifiers
//! are whatever the caller keys on, normally the client address.

use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::api::handlers::auth::utils;

#[derive(Debug, Default)]
struct AttemptRecord {
    /// Unix seconds of recorded failures, oldest first.
    failures: Vec<u64>,
    /// Unix second until which the identifier is locked out.
    locked_until: u64,
}

/// Tracks failed logins per identifier and locks out repeat offenders.
#[derive(Debug)]
pub struct LoginRateLimiter {
    window_seconds: u64,
    max_attempts: usize,
    lockout_seconds: u64,
    records: Mutex<HashMap<String, AttemptRecord>>,
}

impl LoginRateLimiter {
    #[must_use]
    pub fn new(window_seconds: u64, max_attempts: usize, lockout_seconds: u64) -> Self {
        Self {
            window_seconds,
            max_attempts,
            lockout_seconds,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Whether `identifier` may attempt a login right now.
    ///
    /// Returns `(allowed, retry_after_seconds)`; `retry_after_seconds` is
    /// zero whenever the attempt is allowed.
    pub async fn check(&self, identifier: &str) -> (bool, u64) {
        self.check_at(identifier, utils::unix_now()).await
    }

    pub(super) async fn check_at(&self, identifier: &str, now: u64) -> (bool, u64) {
        let mut records = self.records.lock().await;
        let record = records.entry(identifier.to_string()).or_default();

        if record.locked_until > now {
            return (false, record.locked_until - now);
        }

        record
            .failures
            .retain(|&attempted_at| now.saturating_sub(attempted_at) <= self.window_seconds);

        if record.failures.len() >= self.max_attempts {
            record.locked_until = now + self.lockout_seconds;
            return (false, self.lockout_seconds);
        }

        (true, 0)
    }

    /// Record one failed attempt for `identifier`.
    pub async fn record_failure(&self, identifier: &str) {
        self.record_failure_at(identifier, utils::unix_now()).await;
    }

    pub(super) async fn record_failure_at(&self, identifier: &str, now: u64) {
        let mut records = self.records.lock().await;
        records
            .entry(identifier.to_string())
            .or_default()
            .failures
            .push(now);
    }

    /// Forget `identifier` entirely after a successful login.
    pub async fn record_success(&self, identifier: &str) {
        let mut records = self.records.lock().await;
        records.remove(identifier);
    }
}
