//! Motion entry factory
//!
//! Builds motion records from a proposal, stamping the rule-derived
//! attributes. Degree and `applied_to` are derived from the stack the
//! motion is about to be pushed onto.

use super::entities::{Motion, MotionMetadata, MotionStatus, VoteTally};
use super::kind::{MotionCategory, MotionKind};
use super::stack::MotionStack;
use crate::core::ids::MotionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a member asks for before a record exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionProposal {
    #[serde(rename = "type")]
    pub kind: MotionKind,
    pub text: String,
    pub mover: String,
    #[serde(default)]
    pub metadata: MotionMetadata,
}

impl MotionProposal {
    pub fn new(kind: MotionKind, text: impl Into<String>, mover: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            mover: mover.into(),
            metadata: MotionMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: MotionMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

pub struct MotionFactory;

impl MotionFactory {
    /// Build a record for `proposal` as it would sit on top of `stack`
    pub fn create(id: MotionId, proposal: &MotionProposal, stack: &MotionStack, now: u64) -> Motion {
        let rules = proposal.kind.rules();
        let top = stack.top();

        let degree = match (proposal.kind, top) {
            (MotionKind::Amend, Some(t)) if t.is_amendment() => t.degree + 1,
            (MotionKind::Amend, _) => 1,
            _ => 0,
        };

        let applies_to_pending = rules.category == MotionCategory::Subsidiary
            || matches!(
                proposal.kind,
                MotionKind::Division
                    | MotionKind::WithdrawMotion
                    | MotionKind::ObjectionToConsideration
            );
        let applied_to = if applies_to_pending {
            top.map(|t| t.id.clone())
        } else {
            None
        };

        Motion {
            id,
            kind: proposal.kind,
            text: proposal.text.clone(),
            mover: proposal.mover.clone(),
            seconder: None,
            status: MotionStatus::PendingChair,
            degree,
            applied_to,
            votes: VoteTally::default(),
            voted_by: BTreeSet::new(),
            vote_required: rules.vote_required,
            is_debatable: rules.debatable,
            is_amendable: rules.amendable,
            requires_second: rules.requires_second,
            category: rules.category,
            precedence: rules.precedence,
            metadata: proposal.metadata.clone(),
            created_at: now,
            voting_opened_at: None,
        }
    }
}
