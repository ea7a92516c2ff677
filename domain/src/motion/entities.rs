//! Motion domain entities

use super::kind::{MotionCategory, MotionKind, VoteThreshold};
use crate::core::ids::MotionId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Status of a motion record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MotionStatus {
    /// Waiting for the chair to state the question
    #[default]
    PendingChair,
    /// Stated, waiting for a second
    PendingSecond,
    /// Open for debate
    Debating,
    /// Vote in progress
    Voting,
    Adopted,
    Defeated,
    Withdrawn,
    Tabled,
    Postponed,
    Committed,
}

impl MotionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MotionStatus::PendingChair => "pending-chair",
            MotionStatus::PendingSecond => "pending-second",
            MotionStatus::Debating => "debating",
            MotionStatus::Voting => "voting",
            MotionStatus::Adopted => "adopted",
            MotionStatus::Defeated => "defeated",
            MotionStatus::Withdrawn => "withdrawn",
            MotionStatus::Tabled => "tabled",
            MotionStatus::Postponed => "postponed",
            MotionStatus::Committed => "committed",
        }
    }

    /// The motion has left the floor and will not change again
    pub fn is_resolved(&self) -> bool {
        !matches!(
            self,
            MotionStatus::PendingChair
                | MotionStatus::PendingSecond
                | MotionStatus::Debating
                | MotionStatus::Voting
        )
    }

    /// Not yet stated and seconded
    pub fn is_awaiting_consideration(&self) -> bool {
        matches!(self, MotionStatus::PendingChair | MotionStatus::PendingSecond)
    }
}

impl std::fmt::Display for MotionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A member's vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Aye,
    Nay,
    Abstain,
}

impl std::str::FromStr for VoteChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aye" | "yes" | "yea" => Ok(VoteChoice::Aye),
            "nay" | "no" => Ok(VoteChoice::Nay),
            "abstain" => Ok(VoteChoice::Abstain),
            _ => Err(format!("Unknown vote: {}. Valid: aye, nay, abstain", s)),
        }
    }
}

/// Running tally for a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteTally {
    pub aye: u32,
    pub nay: u32,
    pub abstain: u32,
}

impl VoteTally {
    pub fn new(aye: u32, nay: u32, abstain: u32) -> Self {
        Self { aye, nay, abstain }
    }

    /// Ayes plus nays; abstentions are never counted as cast
    pub fn total_cast(&self) -> u32 {
        self.aye + self.nay
    }

    pub fn record(&mut self, choice: VoteChoice) {
        match choice {
            VoteChoice::Aye => self.aye += 1,
            VoteChoice::Nay => self.nay += 1,
            VoteChoice::Abstain => self.abstain += 1,
        }
    }
}

/// One adopted amendment, kept on the amended motion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmendmentRecord {
    pub amendment_id: MotionId,
    /// Text of the amendment motion as moved
    pub amendment_text: String,
    /// Wording that replaced the target's text
    pub proposed_text: String,
    pub previous_text: String,
    pub adopted_at: u64,
}

/// Debate limits attached by an adopted Limit Debate motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DebateLimits {
    pub max_speeches_per_member: Option<u32>,
    pub max_speech_duration_secs: Option<u32>,
    pub total_time_limit_secs: Option<u32>,
}

/// Open metadata map carried by every motion
///
/// Well-known keys are typed fields; anything else lands in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionMetadata {
    pub amendment_history: Vec<AmendmentRecord>,
    /// Replacement wording proposed by an amendment
    pub proposed_text: Option<String>,
    pub debate_limits: Option<DebateLimits>,
    pub postpone_until: Option<String>,
    pub committee: Option<String>,
    pub suspend_purpose: Option<String>,
    pub recess_minutes: Option<u32>,
    /// Millisecond timestamp for Fix Time to Adjourn
    pub adjourn_at: Option<u64>,
    /// Record a bring-back or withdrawal motion refers to
    pub target: Option<MotionId>,
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl MotionMetadata {
    pub fn with_proposed_text(mut self, text: impl Into<String>) -> Self {
        self.proposed_text = Some(text.into());
        self
    }

    pub fn with_debate_limits(mut self, limits: DebateLimits) -> Self {
        self.debate_limits = Some(limits);
        self
    }

    pub fn with_committee(mut self, committee: impl Into<String>) -> Self {
        self.committee = Some(committee.into());
        self
    }

    pub fn with_postpone_until(mut self, when: impl Into<String>) -> Self {
        self.postpone_until = Some(when.into());
        self
    }

    pub fn with_recess_minutes(mut self, minutes: u32) -> Self {
        self.recess_minutes = Some(minutes);
        self
    }

    pub fn with_suspend_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.suspend_purpose = Some(purpose.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<MotionId>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// A motion record on (or formerly on) the stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub id: MotionId,
    #[serde(rename = "type")]
    pub kind: MotionKind,
    pub text: String,
    pub mover: String,
    pub seconder: Option<String>,
    pub status: MotionStatus,
    /// Amendment nesting depth (0 for everything but Amend)
    pub degree: u8,
    /// The motion this one is applied to
    pub applied_to: Option<MotionId>,
    pub votes: VoteTally,
    pub voted_by: BTreeSet<String>,
    pub vote_required: VoteThreshold,
    pub is_debatable: bool,
    pub is_amendable: bool,
    pub requires_second: bool,
    pub category: MotionCategory,
    pub precedence: Option<u8>,
    pub metadata: MotionMetadata,
    pub created_at: u64,
    pub voting_opened_at: Option<u64>,
}

impl Motion {
    /// Status a motion enters once stated and seconded
    pub fn open_status(&self) -> MotionStatus {
        if self.is_debatable {
            MotionStatus::Debating
        } else {
            MotionStatus::Voting
        }
    }

    /// Move into the open status, stamping the vote start if it goes straight to a vote
    pub fn open(&mut self, now: u64) {
        self.status = self.open_status();
        if self.status == MotionStatus::Voting {
            self.voting_opened_at = Some(now);
        }
    }

    pub fn start_voting(&mut self, now: u64) {
        self.status = MotionStatus::Voting;
        self.voting_opened_at = Some(now);
    }

    pub fn has_voted(&self, member: &str) -> bool {
        self.voted_by.contains(member)
    }

    pub fn record_vote(&mut self, member: impl Into<String>, choice: VoteChoice) {
        self.votes.record(choice);
        self.voted_by.insert(member.into());
    }

    pub fn clear_votes(&mut self) {
        self.votes = VoteTally::default();
        self.voted_by.clear();
        self.voting_opened_at = None;
    }

    pub fn is_main(&self) -> bool {
        self.category == MotionCategory::Main
    }

    pub fn is_amendment(&self) -> bool {
        self.kind == MotionKind::Amend
    }
}
