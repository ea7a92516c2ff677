//! Domain error types
//!
//! Every engine operation either returns a complete next state or one of
//! these reasons. The `Display` text of each variant is what the chair (or
//! the member who attempted the action) is shown.

use crate::core::ids::{MotionId, RequestId};
use crate::motion::{MotionKind, MotionStatus};
use crate::request::{RequestStatus, RequestType};
use thiserror::Error;

/// Procedure-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcedureError {
    // ==================== Motion Stack ====================
    #[error("Main motion cannot be made while another is pending")]
    MainMotionPending,

    #[error("{0} cannot be made while a question is pending")]
    QuestionPending(MotionKind),

    #[error("Amendment of degree {degree} exceeds the maximum of {max}")]
    AmendmentDegreeExceeded { degree: u8, max: u8 },

    #[error("An amendment of degree {0} is already pending")]
    AmendmentAlreadyPending(u8),

    #[error("There is no pending question to amend")]
    NothingToAmend,

    #[error("{kind} is out of order while {pending} is pending")]
    PrecedenceViolation {
        kind: MotionKind,
        pending: MotionKind,
    },

    #[error("{kind} is not in order: {reason}")]
    NotInOrder { kind: MotionKind, reason: String },

    #[error("Unknown motion type: {0}")]
    UnknownMotionType(String),

    #[error("No question is pending")]
    NoPendingQuestion,

    #[error("Pending question is {actual}, expected {expected}")]
    UnexpectedStatus {
        expected: MotionStatus,
        actual: MotionStatus,
    },

    #[error("The mover cannot second their own motion")]
    CannotSecondOwnMotion,

    #[error("Only the mover may withdraw the pending question")]
    NotMover,

    #[error("{0} is no longer the pending question")]
    NoLongerPending(MotionId),

    // ==================== Queued Proposals ====================
    #[error("{0} holds the floor")]
    FloorHeld(String),

    #[error("Queued motion {index} does not have the highest precedence")]
    NotHighestPrecedence { index: usize },

    #[error("No queued motion at index {0}")]
    QueuedMotionNotFound(usize),

    // ==================== Roles & Phases ====================
    #[error("Only the chair may {0}")]
    ChairOnly(&'static str),

    #[error("{0} is not recorded as present")]
    NotPresent(String),

    #[error("Cannot {operation} while the meeting is in {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: String,
    },

    #[error("Quorum not met: {present} present, {required} required")]
    QuorumNotMet { present: u32, required: u32 },

    #[error("Recess has {remaining_ms} ms remaining")]
    RecessNotOver { remaining_ms: u64 },

    // ==================== Voting ====================
    #[error("{0} has already voted")]
    AlreadyVoted(String),

    #[error("The pending question is not being voted on")]
    VoteNotOpen,

    #[error("Voting cannot be closed for another {remaining_ms} ms")]
    VoteStillOpen { remaining_ms: u64 },

    #[error("{0} is decided by a vote, not by the chair")]
    RulingNotApplicable(MotionKind),

    #[error("{0} is decided by the chair, not by a vote")]
    VoteNotApplicable(MotionKind),

    // ==================== Debate ====================
    #[error("Debate is not open on the pending question")]
    DebateClosed,

    #[error("{member} has used all {limit} speeches on this question")]
    SpeechLimitReached { member: String, limit: u32 },

    #[error("{0} is already waiting to speak")]
    AlreadyQueued(String),

    #[error("Nobody is waiting to speak")]
    SpeakingQueueEmpty,

    #[error("Nobody holds the floor")]
    FloorVacant,

    #[error("The {limit_secs} seconds allowed for debate on this question have been used")]
    DebateTimeExpired { limit_secs: u32 },

    // ==================== Bring-back ====================
    #[error("No motion matches {0}")]
    NoSuchTarget(String),

    // ==================== Requests ====================
    #[error("Request {0} not found")]
    RequestNotFound(RequestId),

    #[error("Request {id} cannot move from {from} to {to}")]
    InvalidRequestTransition {
        id: RequestId,
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("{0} requires content")]
    ContentRequired(RequestType),

    #[error("{0} does not take a chair response")]
    ResponseNotRequired(RequestType),

    #[error("{0} cannot be escalated to a motion")]
    NotEscalatable(RequestType),
}

impl ProcedureError {
    /// Errors caused by acting out of turn rather than by malformed input.
    ///
    /// Callers typically surface these as a tooltip and otherwise ignore them.
    pub fn is_out_of_turn(&self) -> bool {
        matches!(
            self,
            ProcedureError::FloorHeld(_)
                | ProcedureError::NotHighestPrecedence { .. }
                | ProcedureError::VoteStillOpen { .. }
                | ProcedureError::RecessNotOver { .. }
                | ProcedureError::AlreadyVoted(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_motion_pending_display() {
        let error = ProcedureError::MainMotionPending;
        assert_eq!(
            error.to_string(),
            "Main motion cannot be made while another is pending"
        );
    }

    #[test]
    fn test_precedence_violation_display() {
        let error = ProcedureError::PrecedenceViolation {
            kind: MotionKind::Commit,
            pending: MotionKind::PreviousQuestion,
        };
        assert_eq!(
            error.to_string(),
            "Commit is out of order while Previous Question is pending"
        );
    }

    #[test]
    fn test_is_out_of_turn() {
        assert!(ProcedureError::FloorHeld("alice".to_string()).is_out_of_turn());
        assert!(ProcedureError::AlreadyVoted("bob".to_string()).is_out_of_turn());
        assert!(!ProcedureError::MainMotionPending.is_out_of_turn());
        assert!(!ProcedureError::NoPendingQuestion.is_out_of_turn());
    }
}
