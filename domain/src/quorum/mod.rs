//! Vote and quorum arithmetic
//!
//! - [`rule::QuorumRule`] resolves the attendance needed to do business
//! - [`vote::vote_result`] decides whether a question carried
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Threshold      │ Adopted when                            │
//! ├──────────────────────────────────────────────────────────┤
//! │  majority       │ aye > denom / 2                         │
//! │  two-thirds     │ aye >= 2 * denom / 3                    │
//! │  tie-sustains   │ aye > nay (ruling overturned)           │
//! │  none           │ always (chair decides)                  │
//! └──────────────────────────────────────────────────────────┘
//!   denom = aye + nay, unless a members-present or
//!   entire-membership count is supplied
//! ```

pub mod rule;
pub mod vote;

pub use rule::{QuorumFraction, QuorumRule};
pub use vote::{VoteOutcome, VoteResult, VotingBasis, VotingContext, vote_result};
