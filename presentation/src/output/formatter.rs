//! Output formatter trait

use gavel_application::Minutes;
use gavel_domain::{LogEntry, MeetingState, MotionAvailability};

/// Trait for rendering engine results
pub trait OutputFormatter {
    /// Format the meeting state
    fn format_state(&self, state: &MeetingState) -> String;

    /// Format the motion availability list
    fn format_availability(&self, availability: &[MotionAvailability]) -> String;

    /// Format exported minutes
    fn format_minutes(&self, minutes: &Minutes) -> String;

    /// Format the log entries produced by one action
    fn format_entries(&self, entries: &[LogEntry]) -> String;
}
