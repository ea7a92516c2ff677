//! Motions: the rules table, the entry factory and the motion stack.
//!
//! ```
//! use gavel_domain::motion::{MotionFactory, MotionKind, MotionProposal, MotionStack};
//! use gavel_domain::MotionId;
//!
//! let stack = MotionStack::new();
//! let main = MotionFactory::create(
//!     MotionId::from_sequence(1),
//!     &MotionProposal::new(MotionKind::Main, "allocate $500 for snacks", "alice"),
//!     &stack,
//!     0,
//! );
//! let stack = stack.push(main).unwrap();
//!
//! let second_main = MotionFactory::create(
//!     MotionId::from_sequence(2),
//!     &MotionProposal::new(MotionKind::Main, "buy a projector", "bob"),
//!     &stack,
//!     0,
//! );
//! assert!(stack.push(second_main).is_err());
//! ```

pub mod entities;
pub mod factory;
pub mod kind;
pub mod rules;
pub mod stack;

pub use entities::{
    AmendmentRecord, DebateLimits, Motion, MotionMetadata, MotionStatus, VoteChoice, VoteTally,
};
pub use factory::{MotionFactory, MotionProposal};
pub use kind::{MotionCategory, MotionKind, VoteThreshold};
pub use rules::{MAX_AMENDMENT_DEGREE, MotionRules};
pub use stack::MotionStack;
