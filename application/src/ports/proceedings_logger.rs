//! Port for the structured proceedings log.
//!
//! Defines the [`ProceedingsLogger`] trait for recording what happened in a
//! meeting (motions made, votes closed, rulings, rejected intents) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! proceedings in a machine-readable format (JSONL) for minutes and audit.

use serde_json::Value;

/// A structured proceedings event for logging.
pub struct ProceedingsEvent {
    /// Event type identifier (e.g., "proceedings", "intent_rejected").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ProceedingsEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging proceedings events.
///
/// `log` is synchronous and infallible; a failed write must never block
/// the meeting.
pub trait ProceedingsLogger: Send + Sync {
    fn log(&self, event: ProceedingsEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoProceedingsLogger;

impl ProceedingsLogger for NoProceedingsLogger {
    fn log(&self, _event: ProceedingsEvent) {}
}
