//! Debate scheduling: speaking queue order, speech limits and the
//! per-question debate context.

pub mod context;
pub mod limits;
pub mod queue;

pub use context::{CurrentSpeaker, DebateContext, SpeakingQueueEntry, Speech, Stance};
pub use limits::{
    DEFAULT_SPEECHES_PER_MEMBER, DebateConstraints, SpeakPermission, can_speak, constraints,
    debate_time_expired, speech_expired,
};
pub use queue::sort_queue;
