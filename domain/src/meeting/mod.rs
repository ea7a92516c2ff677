//! Meeting state and the operations that advance it.
//!
//! ```
//! use gavel_domain::core::participant::Actor;
//! use gavel_domain::meeting::{MeetingPhase, MeetingState};
//! use gavel_domain::motion::{MotionKind, MotionProposal};
//! use gavel_domain::settings::ProcedureSettings;
//!
//! let chair = Actor::chair("chair");
//! let alice = Actor::member("alice");
//!
//! let state = MeetingState::new("board", ProcedureSettings::default())
//!     .mark_present(&chair, "chair", 0).unwrap()
//!     .mark_present(&chair, "alice", 0).unwrap()
//!     .call_to_order(&chair, 1_000).unwrap();
//! assert_eq!(state.phase, MeetingPhase::NewBusiness);
//!
//! let proposal = MotionProposal::new(MotionKind::Main, "allocate $500 for snacks", "alice");
//! let state = state.propose_motion(&alice, proposal, 2_000).unwrap();
//! assert_eq!(state.phase, MeetingPhase::Deliberation);
//! assert_eq!(state.stack.len(), 1);
//! ```

pub mod operations;
pub mod phase;
pub mod queued;
pub mod state;

pub use phase::MeetingPhase;
pub use queued::{DismissedProposal, QueuedMotions, QueuedProposal};
pub use state::{
    ChairRuling, DecidedMotion, LogEntry, MeetingState, SuspensionSnapshot, TabledUnit,
};
