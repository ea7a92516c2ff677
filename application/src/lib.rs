//! Application layer for gavel
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    meeting_store::{MeetingStore, StoreError},
    proceedings_logger::{NoProceedingsLogger, ProceedingsEvent, ProceedingsLogger},
};
pub use use_cases::apply_intent::{
    ApplyIntentError, ApplyIntentInput, ApplyIntentOutput, ApplyIntentUseCase, Intent,
};
pub use use_cases::export_minutes::{ExportMinutesUseCase, Minutes, MinutesDecision, MinutesDeferral};
pub use use_cases::open_meeting::{
    OpenMeetingError, OpenMeetingInput, OpenMeetingOutput, OpenMeetingUseCase,
};
pub use use_cases::query_meeting::QueryMeetingUseCase;
