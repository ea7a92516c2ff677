//! Domain layer for gavel
//!
//! This crate contains the parliamentary procedure engine. It has no
//! dependencies on infrastructure or presentation concerns, performs no I/O
//! and never reads a clock: every time-sensitive rule takes `now` (in
//! milliseconds) from the caller.
//!
//! # Core Concepts
//!
//! ## Motion Stack
//!
//! Pending motions sit on an ordered stack. The main motion is at the
//! bottom; subsidiary motions may only be stacked in ascending precedence,
//! and amendments nest at most two degrees deep.
//!
//! ## Disposition
//!
//! When the pending question is decided, a registry maps its type to an
//! effect handler that describes the [`Transition`]: resume, merge an
//! amendment, archive the stack, force a vote, switch the meeting mode.
//!
//! ## Meeting State
//!
//! [`MeetingState`] is an immutable, versioned value. Every operation takes
//! the current state and returns the next one (or a [`ProcedureError`]);
//! committing it is the caller's job.

pub mod availability;
pub mod core;
pub mod debate;
pub mod disposition;
pub mod meeting;
pub mod motion;
pub mod quorum;
pub mod request;
pub mod settings;

// Re-export commonly used types
pub use availability::{AvailabilityContext, MotionAvailability, available};
pub use core::{
    error::ProcedureError,
    ids::{MotionId, RequestId},
    participant::{Actor, Role},
};
pub use debate::{DebateContext, SpeakingQueueEntry, Stance, can_speak, sort_queue};
pub use disposition::{Decision, Transition, resolve};
pub use meeting::{DecidedMotion, LogEntry, MeetingPhase, MeetingState, TabledUnit};
pub use motion::{
    Motion, MotionCategory, MotionKind, MotionMetadata, MotionProposal, MotionStack, MotionStatus,
    VoteChoice, VoteTally, VoteThreshold,
};
pub use quorum::{QuorumFraction, QuorumRule, VoteOutcome, VoteResult, VotingBasis, VotingContext};
pub use request::{PendingRequest, RequestStatus, RequestType};
pub use settings::{
    ProcedureSettings,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
