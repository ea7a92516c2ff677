//! Organization-level procedure settings carried inside the meeting state.
//!
//! Settings travel with the state so every engine call sees the same rules
//! the meeting was opened with.

pub mod validation;

use crate::motion::DebateLimits;
use crate::quorum::{QuorumRule, VotingBasis};
use serde::{Deserialize, Serialize};
use validation::{ConfigIssue, ConfigIssueCode};

/// Non-voters are counted as abstaining once a vote has been open this long
pub const DEFAULT_ABSTENTION_WINDOW_MS: u64 = 60_000;

/// The chair may close a vote early once it has been open this long
pub const DEFAULT_EARLY_CLOSE_MS: u64 = 30_000;

/// Minutes of recess when the Recess motion names no duration
pub const DEFAULT_RECESS_MINUTES: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcedureSettings {
    /// Organization debate defaults
    pub debate: DebateLimits,
    pub quorum: QuorumRule,
    pub voting_basis: VotingBasis,
    /// Size of the full membership; falls back to the roster size
    pub total_membership: Option<u32>,
    pub abstention_window_ms: u64,
    pub early_close_ms: u64,
}

impl Default for ProcedureSettings {
    fn default() -> Self {
        Self {
            debate: DebateLimits::default(),
            quorum: QuorumRule::default(),
            voting_basis: VotingBasis::default(),
            total_membership: None,
            abstention_window_ms: DEFAULT_ABSTENTION_WINDOW_MS,
            early_close_ms: DEFAULT_EARLY_CLOSE_MS,
        }
    }
}

impl ProcedureSettings {
    pub fn with_quorum(mut self, quorum: QuorumRule) -> Self {
        self.quorum = quorum;
        self
    }

    pub fn with_total_membership(mut self, total: u32) -> Self {
        self.total_membership = Some(total);
        self
    }

    pub fn with_debate(mut self, debate: DebateLimits) -> Self {
        self.debate = debate;
        self
    }

    pub fn with_voting_basis(mut self, basis: VotingBasis) -> Self {
        self.voting_basis = basis;
        self
    }

    /// Validate the settings combination.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if let QuorumRule::FixedNumber(n) = self.quorum {
            if n == 0 {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::QuorumZero,
                    "quorum: fixed number 0 is treated as 1",
                ));
            }
            if let Some(total) = self.total_membership
                && n > total
            {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::QuorumUnreachable,
                    format!(
                        "quorum: {} members required but the membership is only {}",
                        n, total
                    ),
                ));
            }
        }

        if self.voting_basis == VotingBasis::EntireMembership && self.total_membership.is_none() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MembershipUnknown,
                "voting: entire-membership basis requires total_membership",
            ));
        }

        if self.debate.max_speeches_per_member == Some(0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoSpeechesAllowed,
                "debate: max_speeches_per_member of 0 leaves no one able to speak",
            ));
        }

        if self.early_close_ms > self.abstention_window_ms {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EarlyCloseAfterAbstention,
                format!(
                    "voting: early close ({} ms) is later than the abstention window ({} ms)",
                    self.early_close_ms, self.abstention_window_ms
                ),
            ));
        }

        issues
    }
}
