//! Audit trail for login activity.
//!
//! Every login outcome is recorded through an [`AuditSink`] so deployments
//! can ship events wherever they keep their trail. The default sink writes
//! structured log lines under the `audit` target.

use tracing::{info, warn};

pub(super) const LOGIN_SUCCESS: &str = "admin.login.success";
pub(super) const LOGIN_FAILURE: &str = "admin.login.failure";
pub(super) const LOGIN_LOCKOUT: &str = "admin.login.lockout";
pub(super) const LOGOUT: &str = "admin.logout";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditEvent {
    pub kind: String,
    pub actor: String,
    pub note: String,
}

impl AuditEvent {
    #[must_use]
    pub fn new(kind: impl Into<String>, actor: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            actor: actor.into(),
            note: String::new(),
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Audit sink unavailable: {0}")]
    Unavailable(String),
}

pub trait AuditSink: Send + Sync {
    /// Persist one event.
    ///
    /// # Errors
    ///
    /// Returns an error when the sink cannot accept the event.
    fn record(&self, event: &AuditEvent) -> Result<(), AuditError>;
}

/// Sink that emits audit events as structured log lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: &AuditEvent) -> Result<(), AuditError> {
        info!(
            target: "audit",
            kind = %event.kind,
            actor = %event.actor,
            note = %event.note,
        );
        Ok(())
    }
}

/// Record an event, logging instead of failing the request when the sink
/// rejects it. Login outcomes must reach the client even when the trail
/// is down.
pub(super) fn record_best_effort(sink: &dyn AuditSink, event: AuditEvent) {
    if let Err(err) = sink.record(&event) {
        warn!("Failed to record audit event {}: {err}", event.kind);
    }
}
