//! Per-type adoption effects.
//!
//! Each motion type maps to one handler that inspects the resolved motion
//! and its outcome and describes what should happen next. Handlers never
//! touch the state; the dispatcher applies the returned [`Transition`].

use crate::core::ids::MotionId;
use crate::motion::{DebateLimits, Motion, MotionKind, MotionStatus};
use crate::quorum::VoteOutcome;
use crate::settings::DEFAULT_RECESS_MINUTES;
use serde::{Deserialize, Serialize};

/// What the resolution of a motion does to the meeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transition", rename_all = "kebab-case")]
pub enum Transition {
    /// Resume debate or voting on the newly exposed question
    Resume,
    /// Replace the target's text, keeping the old wording in its history
    MergeAmendment {
        target: MotionId,
        proposed_text: String,
    },
    /// Put the newly exposed question to a vote without further debate
    ForceVote,
    /// Move the remaining stack into tabled history as one unit
    ArchiveStack { status: MotionStatus },
    /// Drop the remaining stack without archiving it
    DiscardStack,
    AttachDebateLimits { limits: DebateLimits },
    Adjourn,
    Recess { minutes: u32 },
    SuspendRules { purpose: Option<String> },
    RecordRuling { ruling: String },
    ClearRuling,
    /// Clear the tally beneath and take the vote again
    Revote,
    /// Withdraw the question the motion was applied to
    WithdrawPending,
    TakeFromTable { target: Option<MotionId> },
    Reconsider { target: Option<MotionId> },
    Rescind { target: Option<MotionId> },
    FixAdjournTime { at: Option<u64> },
}

pub type EffectHandler = fn(&Motion, &VoteOutcome) -> Transition;

/// The effect handler registered for `kind`
pub fn effect_handler(kind: MotionKind) -> EffectHandler {
    match kind {
        MotionKind::Main
        | MotionKind::OrdersOfTheDay
        | MotionKind::QuestionOfPrivilege
        | MotionKind::ParliamentaryInquiry
        | MotionKind::RequestForInformation => resume,
        MotionKind::Amend => amend,
        MotionKind::PreviousQuestion => previous_question,
        MotionKind::LayOnTable => lay_on_table,
        MotionKind::PostponeDefinitely => postpone_definitely,
        MotionKind::Commit => commit,
        MotionKind::PostponeIndefinitely | MotionKind::ObjectionToConsideration => discard,
        MotionKind::LimitDebate => limit_debate,
        MotionKind::Adjourn => adjourn,
        MotionKind::Recess => recess,
        MotionKind::FixTimeToAdjourn => fix_time_to_adjourn,
        MotionKind::SuspendRules => suspend_rules,
        MotionKind::PointOfOrder => point_of_order,
        MotionKind::Appeal => appeal,
        MotionKind::Division => division,
        MotionKind::WithdrawMotion => withdraw,
        MotionKind::TakeFromTable => take_from_table,
        MotionKind::Reconsider => reconsider,
        MotionKind::Rescind => rescind,
    }
}

/// Look up and run the handler for `motion`
pub fn transition_for(motion: &Motion, outcome: &VoteOutcome) -> Transition {
    effect_handler(motion.kind)(motion, outcome)
}

fn when_adopted(outcome: &VoteOutcome, transition: Transition) -> Transition {
    if outcome.is_adopted() {
        transition
    } else {
        Transition::Resume
    }
}

fn resume(_: &Motion, _: &VoteOutcome) -> Transition {
    Transition::Resume
}

fn amend(motion: &Motion, outcome: &VoteOutcome) -> Transition {
    match &motion.applied_to {
        Some(target) if outcome.is_adopted() => Transition::MergeAmendment {
            target: target.clone(),
            proposed_text: motion
                .metadata
                .proposed_text
                .clone()
                .unwrap_or_else(|| motion.text.clone()),
        },
        _ => Transition::Resume,
    }
}

fn previous_question(_: &Motion, outcome: &VoteOutcome) -> Transition {
    when_adopted(outcome, Transition::ForceVote)
}

fn lay_on_table(_: &Motion, outcome: &VoteOutcome) -> Transition {
    when_adopted(
        outcome,
        Transition::ArchiveStack {
            status: MotionStatus::Tabled,
        },
    )
}

fn postpone_definitely(_: &Motion, outcome: &VoteOutcome) -> Transition {
    when_adopted(
        outcome,
        Transition::ArchiveStack {
            status: MotionStatus::Postponed,
        },
    )
}

fn commit(_: &Motion, outcome: &VoteOutcome) -> Transition {
    when_adopted(
        outcome,
        Transition::ArchiveStack {
            status: MotionStatus::Committed,
        },
    )
}

fn discard(_: &Motion, outcome: &VoteOutcome) -> Transition {
    when_adopted(outcome, Transition::DiscardStack)
}

fn limit_debate(motion: &Motion, outcome: &VoteOutcome) -> Transition {
    match motion.metadata.debate_limits {
        Some(limits) if outcome.is_adopted() => Transition::AttachDebateLimits { limits },
        _ => Transition::Resume,
    }
}

fn adjourn(_: &Motion, outcome: &VoteOutcome) -> Transition {
    when_adopted(outcome, Transition::Adjourn)
}

fn recess(motion: &Motion, outcome: &VoteOutcome) -> Transition {
    when_adopted(
        outcome,
        Transition::Recess {
            minutes: motion
                .metadata
                .recess_minutes
                .unwrap_or(DEFAULT_RECESS_MINUTES),
        },
    )
}

fn fix_time_to_adjourn(motion: &Motion, outcome: &VoteOutcome) -> Transition {
    when_adopted(
        outcome,
        Transition::FixAdjournTime {
            at: motion.metadata.adjourn_at,
        },
    )
}

fn suspend_rules(motion: &Motion, outcome: &VoteOutcome) -> Transition {
    when_adopted(
        outcome,
        Transition::SuspendRules {
            purpose: motion.metadata.suspend_purpose.clone(),
        },
    )
}

fn point_of_order(_: &Motion, outcome: &VoteOutcome) -> Transition {
    Transition::RecordRuling {
        ruling: outcome.description.clone(),
    }
}

// Sustained or overturned, the ruling is no longer open to appeal
fn appeal(_: &Motion, _: &VoteOutcome) -> Transition {
    Transition::ClearRuling
}

fn division(_: &Motion, outcome: &VoteOutcome) -> Transition {
    when_adopted(outcome, Transition::Revote)
}

fn withdraw(_: &Motion, outcome: &VoteOutcome) -> Transition {
    when_adopted(outcome, Transition::WithdrawPending)
}

fn take_from_table(motion: &Motion, outcome: &VoteOutcome) -> Transition {
    when_adopted(
        outcome,
        Transition::TakeFromTable {
            target: motion.metadata.target.clone(),
        },
    )
}

fn reconsider(motion: &Motion, outcome: &VoteOutcome) -> Transition {
    when_adopted(
        outcome,
        Transition::Reconsider {
            target: motion.metadata.target.clone(),
        },
    )
}

fn rescind(motion: &Motion, outcome: &VoteOutcome) -> Transition {
    when_adopted(
        outcome,
        Transition::Rescind {
            target: motion.metadata.target.clone(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{MotionFactory, MotionMetadata, MotionProposal, MotionStack};

    fn motion(kind: MotionKind, metadata: MotionMetadata) -> Motion {
        let main = MotionFactory::create(
            MotionId::from_sequence(1),
            &MotionProposal::new(MotionKind::Main, "allocate $500", "alice"),
            &MotionStack::new(),
            0,
        );
        let stack = MotionStack::new().push(main).unwrap();
        MotionFactory::create(
            MotionId::from_sequence(2),
            &MotionProposal::new(kind, kind.display_name(), "bob").with_metadata(metadata),
            &stack,
            0,
        )
    }

    fn adopted() -> VoteOutcome {
        VoteOutcome::adopted("Adopted")
    }

    fn defeated() -> VoteOutcome {
        VoteOutcome::defeated("Defeated")
    }

    #[test]
    fn test_every_kind_defeated_resumes_or_clears() {
        for kind in MotionKind::ALL {
            let transition = transition_for(&motion(kind, MotionMetadata::default()), &defeated());
            assert!(
                matches!(
                    transition,
                    Transition::Resume | Transition::ClearRuling | Transition::RecordRuling { .. }
                ),
                "{} defeated produced {:?}",
                kind,
                transition
            );
        }
    }

    #[test]
    fn test_amend_carries_target_and_text() {
        let m = motion(
            MotionKind::Amend,
            MotionMetadata::default().with_proposed_text("raise to $700"),
        );
        assert_eq!(
            transition_for(&m, &adopted()),
            Transition::MergeAmendment {
                target: MotionId::from_sequence(1),
                proposed_text: "raise to $700".to_string(),
            }
        );
    }

    #[test]
    fn test_archive_statuses() {
        let cases = [
            (MotionKind::LayOnTable, MotionStatus::Tabled),
            (MotionKind::PostponeDefinitely, MotionStatus::Postponed),
            (MotionKind::Commit, MotionStatus::Committed),
        ];
        for (kind, status) in cases {
            assert_eq!(
                transition_for(&motion(kind, MotionMetadata::default()), &adopted()),
                Transition::ArchiveStack { status }
            );
        }
    }

    #[test]
    fn test_recess_defaults_duration() {
        assert_eq!(
            transition_for(&motion(MotionKind::Recess, MotionMetadata::default()), &adopted()),
            Transition::Recess {
                minutes: DEFAULT_RECESS_MINUTES
            }
        );
        assert_eq!(
            transition_for(
                &motion(MotionKind::Recess, MotionMetadata::default().with_recess_minutes(5)),
                &adopted()
            ),
            Transition::Recess { minutes: 5 }
        );
    }

    #[test]
    fn test_limit_debate_without_limits_resumes() {
        assert_eq!(
            transition_for(&motion(MotionKind::LimitDebate, MotionMetadata::default()), &adopted()),
            Transition::Resume
        );
    }

    #[test]
    fn test_appeal_clears_either_way() {
        let m = motion(MotionKind::Appeal, MotionMetadata::default());
        assert_eq!(transition_for(&m, &adopted()), Transition::ClearRuling);
        assert_eq!(transition_for(&m, &defeated()), Transition::ClearRuling);
    }
}
