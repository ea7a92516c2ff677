//! Vote threshold arithmetic
//!
//! Abstentions never count toward the votes cast. The denominator is the
//! votes cast unless the caller supplies a basis override (members present
//! or the entire membership).

use crate::motion::{VoteTally, VoteThreshold};
use serde::{Deserialize, Serialize};

/// Population used as the denominator for a threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VotingBasis {
    #[default]
    VotesCast,
    MembersPresent,
    EntireMembership,
}

impl std::str::FromStr for VotingBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "votes-cast" | "cast" => Ok(VotingBasis::VotesCast),
            "members-present" | "present" => Ok(VotingBasis::MembersPresent),
            "entire-membership" | "membership" => Ok(VotingBasis::EntireMembership),
            _ => Err(format!(
                "Unknown voting basis: {}. Valid: votes-cast, members-present, entire-membership",
                s
            )),
        }
    }
}

/// Counts supplied by the caller when a vote is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VotingContext {
    pub basis: VotingBasis,
    pub members_present: u32,
    pub total_membership: u32,
}

impl VotingContext {
    pub fn new(basis: VotingBasis, members_present: u32, total_membership: u32) -> Self {
        Self {
            basis,
            members_present,
            total_membership,
        }
    }

    /// Denominator to use instead of the votes cast, if any
    pub fn denominator_override(&self) -> Option<u32> {
        match self.basis {
            VotingBasis::VotesCast => None,
            VotingBasis::MembersPresent => Some(self.members_present),
            VotingBasis::EntireMembership => Some(self.total_membership),
        }
    }
}

/// Whether the question carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteResult {
    Adopted,
    Defeated,
}

impl VoteResult {
    pub fn is_adopted(&self) -> bool {
        matches!(self, VoteResult::Adopted)
    }
}

impl std::fmt::Display for VoteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteResult::Adopted => write!(f, "Adopted"),
            VoteResult::Defeated => write!(f, "Defeated"),
        }
    }
}

/// Result plus the sentence recorded in the minutes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub result: VoteResult,
    pub description: String,
}

impl VoteOutcome {
    pub fn adopted(description: impl Into<String>) -> Self {
        Self {
            result: VoteResult::Adopted,
            description: description.into(),
        }
    }

    pub fn defeated(description: impl Into<String>) -> Self {
        Self {
            result: VoteResult::Defeated,
            description: description.into(),
        }
    }

    pub fn is_adopted(&self) -> bool {
        self.result.is_adopted()
    }
}

/// Evaluate `votes` against `threshold`
///
/// # Example
///
/// ```
/// use gavel_domain::motion::{VoteTally, VoteThreshold};
/// use gavel_domain::quorum::vote_result;
///
/// let tally = VoteTally::new(6, 4, 0);
/// assert!(vote_result(&tally, VoteThreshold::Majority, None).is_adopted());
/// assert!(!vote_result(&tally, VoteThreshold::TwoThirds, None).is_adopted());
/// ```
pub fn vote_result(
    votes: &VoteTally,
    threshold: VoteThreshold,
    denominator_override: Option<u32>,
) -> VoteOutcome {
    if threshold == VoteThreshold::ChairDecides {
        return VoteOutcome::adopted("Decided by the chair");
    }

    let cast = votes.total_cast();
    if cast == 0 {
        return VoteOutcome::defeated("Defeated: no votes cast");
    }

    let (aye, nay) = (votes.aye, votes.nay);
    let denom = denominator_override.unwrap_or(cast);
    let basis = match denominator_override {
        Some(n) => format!("{} members", n),
        None => format!("{} votes cast", cast),
    };

    match threshold {
        VoteThreshold::Majority => {
            if 2 * aye > denom {
                VoteOutcome::adopted(format!(
                    "Adopted: {} in favor, {} opposed (majority of {})",
                    aye, nay, basis
                ))
            } else {
                VoteOutcome::defeated(format!(
                    "Defeated: {} in favor, {} opposed (majority of {} required)",
                    aye, nay, basis
                ))
            }
        }
        VoteThreshold::TwoThirds => {
            if 3 * aye >= 2 * denom {
                VoteOutcome::adopted(format!(
                    "Adopted: {} in favor, {} opposed (two-thirds of {})",
                    aye, nay, basis
                ))
            } else {
                VoteOutcome::defeated(format!(
                    "Defeated: {} in favor, {} opposed (two-thirds of {} required)",
                    aye, nay, basis
                ))
            }
        }
        VoteThreshold::TieSustains => {
            if aye > nay {
                VoteOutcome::adopted(format!(
                    "Ruling of the chair overturned, {} to {}",
                    aye, nay
                ))
            } else {
                VoteOutcome::defeated(format!("Ruling of the chair sustained, {} to {}", aye, nay))
            }
        }
        VoteThreshold::ChairDecides => VoteOutcome::adopted("Decided by the chair"),
    }
}
