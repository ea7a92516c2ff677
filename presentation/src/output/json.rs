//! JSON output for scripting and other front ends

use crate::output::formatter::OutputFormatter;
use gavel_application::Minutes;
use gavel_domain::{LogEntry, MeetingState, MotionAvailability};
use serde::Serialize;

/// Formats results as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_state(&self, state: &MeetingState) -> String {
        Self::to_json(state)
    }

    fn format_availability(&self, availability: &[MotionAvailability]) -> String {
        Self::to_json(availability)
    }

    fn format_minutes(&self, minutes: &Minutes) -> String {
        Self::to_json(minutes)
    }

    fn format_entries(&self, entries: &[LogEntry]) -> String {
        Self::to_json(entries)
    }
}
