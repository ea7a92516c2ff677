//! Which motions may be made right now, and why the rest may not.
//!
//! Every motion type is evaluated independently against the stack, the
//! meeting phase and a small amount of history. The `reason` strings are
//! shown verbatim as tooltips on disabled affordances.

use crate::meeting::MeetingPhase;
use crate::motion::{MotionCategory, MotionKind, MotionStack, MotionStatus};
use serde::{Deserialize, Serialize};

/// History facts the resolver needs beyond the stack itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AvailabilityContext {
    /// A chair ruling was issued and has not been appealed or cleared
    pub chair_ruling_pending: bool,
    /// An open point-of-order request exists outside the stack
    pub point_of_order_raised: bool,
    pub tabled_count: usize,
    /// Decided main motions that may be reconsidered
    pub reconsiderable_count: usize,
    /// Adopted main motions not yet rescinded
    pub rescindable_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionAvailability {
    #[serde(rename = "type")]
    pub kind: MotionKind,
    pub category: MotionCategory,
    pub enabled: bool,
    pub reason: Option<String>,
}

impl MotionAvailability {
    fn from_check(kind: MotionKind, check: Result<(), String>) -> Self {
        let (enabled, reason) = match check {
            Ok(()) => (true, None),
            Err(reason) => (false, Some(reason)),
        };
        Self {
            kind,
            category: kind.category(),
            enabled,
            reason,
        }
    }
}

/// Evaluate every motion type
pub fn available(
    stack: &MotionStack,
    phase: MeetingPhase,
    context: &AvailabilityContext,
) -> Vec<MotionAvailability> {
    MotionKind::ALL
        .iter()
        .map(|&kind| availability_of(kind, stack, phase, context))
        .collect()
}

/// Evaluate a single motion type
pub fn availability_of(
    kind: MotionKind,
    stack: &MotionStack,
    phase: MeetingPhase,
    context: &AvailabilityContext,
) -> MotionAvailability {
    let check = match kind.category() {
        MotionCategory::Main => check_main(stack, phase),
        MotionCategory::Subsidiary => check_subsidiary(kind, stack, phase),
        MotionCategory::Privileged => check_privileged(kind, stack, phase),
        MotionCategory::Incidental => check_incidental(kind, stack, phase, context),
        MotionCategory::BringBack => check_bring_back(kind, stack, phase, context),
    };
    MotionAvailability::from_check(kind, check)
}

fn phase_reason(phase: MeetingPhase) -> String {
    match phase {
        MeetingPhase::NotStarted => "The meeting has not been called to order".to_string(),
        MeetingPhase::Adjourned => "The meeting has adjourned".to_string(),
        MeetingPhase::Recess { .. } => "The meeting is in recess".to_string(),
        MeetingPhase::RulesSuspended => "The rules are suspended".to_string(),
        MeetingPhase::NewBusiness | MeetingPhase::Deliberation => {
            "The meeting is not conducting business".to_string()
        }
    }
}

fn check_main(stack: &MotionStack, phase: MeetingPhase) -> Result<(), String> {
    if !phase.is_business() {
        return Err(phase_reason(phase));
    }
    if !stack.is_empty() {
        return Err("Another question is pending".to_string());
    }
    if phase != MeetingPhase::NewBusiness {
        return Err("Main motions are only in order during new business".to_string());
    }
    Ok(())
}

fn check_subsidiary(kind: MotionKind, stack: &MotionStack, phase: MeetingPhase) -> Result<(), String> {
    if !phase.is_business() {
        return Err(phase_reason(phase));
    }
    let Some(top) = stack.top() else {
        return Err("No question is pending".to_string());
    };
    if !matches!(
        top.status,
        MotionStatus::Debating | MotionStatus::PendingSecond | MotionStatus::PendingChair
    ) {
        return Err(format!("{} is being voted on", top.kind));
    }

    if kind == MotionKind::Amend {
        if !top.is_amendable {
            return Err(format!("{} cannot be amended", top.kind));
        }
        if stack.current_degree() >= 2 {
            return Err("Amendments are limited to two degrees".to_string());
        }
        let degree = if top.is_amendment() { top.degree + 1 } else { 1 };
        if stack.pending_amendment(degree).is_some() {
            return Err(format!(
                "An amendment of degree {} is already pending",
                degree
            ));
        }
        return Ok(());
    }

    if top.status.is_awaiting_consideration() {
        return Err("The pending question has not been stated and seconded".to_string());
    }
    if kind == MotionKind::PostponeIndefinitely && !top.is_main() {
        return Err("Only applies while the main motion is the immediately pending question".to_string());
    }
    if top.category == MotionCategory::Subsidiary && top.precedence >= kind.precedence() {
        return Err(format!("Out of order while {} is pending", top.kind));
    }
    Ok(())
}

fn check_privileged(kind: MotionKind, stack: &MotionStack, phase: MeetingPhase) -> Result<(), String> {
    if !phase.is_business() {
        return Err(phase_reason(phase));
    }
    if stack.contains_kind(kind) {
        return Err(format!("{} is already pending", kind));
    }
    Ok(())
}

fn check_incidental(
    kind: MotionKind,
    stack: &MotionStack,
    phase: MeetingPhase,
    context: &AvailabilityContext,
) -> Result<(), String> {
    if !phase.is_in_session() {
        return Err(phase_reason(phase));
    }
    match kind {
        MotionKind::PointOfOrder => {
            if stack.contains_kind(kind) || context.point_of_order_raised {
                return Err("A point of order is already pending".to_string());
            }
        }
        MotionKind::Appeal => {
            if stack.contains_kind(kind) {
                return Err("An appeal is already pending".to_string());
            }
            if !context.chair_ruling_pending {
                return Err("There is no ruling of the chair to appeal".to_string());
            }
        }
        MotionKind::Division => {
            if stack.top().map(|m| m.status) != Some(MotionStatus::Voting) {
                return Err("No vote is in progress".to_string());
            }
        }
        MotionKind::SuspendRules => {
            if phase == MeetingPhase::RulesSuspended {
                return Err("The rules are already suspended".to_string());
            }
        }
        MotionKind::WithdrawMotion => {
            if stack.is_empty() {
                return Err("No question is pending".to_string());
            }
        }
        MotionKind::ObjectionToConsideration => {
            let before_vote = stack.top().is_some_and(|top| {
                top.is_main()
                    && matches!(
                        top.status,
                        MotionStatus::PendingChair
                            | MotionStatus::PendingSecond
                            | MotionStatus::Debating
                    )
            });
            if !before_vote {
                return Err(
                    "Only in order against a main motion before it is put to a vote".to_string(),
                );
            }
        }
        _ => {}
    }
    Ok(())
}

fn check_bring_back(
    kind: MotionKind,
    stack: &MotionStack,
    phase: MeetingPhase,
    context: &AvailabilityContext,
) -> Result<(), String> {
    check_main(stack, phase)?;
    let (count, reason) = match kind {
        MotionKind::TakeFromTable => (context.tabled_count, "Nothing has been laid on the table"),
        MotionKind::Reconsider => (
            context.reconsiderable_count,
            "No decided motion to reconsider",
        ),
        _ => (context.rescindable_count, "No adopted motion to rescind"),
    };
    if count == 0 {
        return Err(reason.to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::MotionId;
    use crate::motion::{Motion, MotionFactory, MotionProposal};

    fn motion(stack: &MotionStack, seq: u64, kind: MotionKind, status: MotionStatus) -> Motion {
        let mut m = MotionFactory::create(
            MotionId::from_sequence(seq),
            &MotionProposal::new(kind, kind.display_name(), "alice"),
            stack,
            0,
        );
        m.status = status;
        m
    }

    fn stack_of(entries: &[(MotionKind, MotionStatus)]) -> MotionStack {
        let mut stack = MotionStack::new();
        for (seq, &(kind, status)) in entries.iter().enumerate() {
            let entry = motion(&stack, seq as u64 + 1, kind, status);
            stack = stack.push(entry).unwrap();
        }
        stack
    }

    fn lookup(list: &[MotionAvailability], kind: MotionKind) -> &MotionAvailability {
        list.iter().find(|a| a.kind == kind).unwrap()
    }

    fn reason(list: &[MotionAvailability], kind: MotionKind) -> &str {
        lookup(list, kind).reason.as_deref().unwrap_or("")
    }

    #[test]
    fn test_every_type_is_listed() {
        let list = available(
            &MotionStack::new(),
            MeetingPhase::NewBusiness,
            &AvailabilityContext::default(),
        );
        assert_eq!(list.len(), MotionKind::ALL.len());
    }

    #[test]
    fn test_main_only_on_empty_floor_in_new_business() {
        let ctx = AvailabilityContext::default();
        let list = available(&MotionStack::new(), MeetingPhase::NewBusiness, &ctx);
        assert!(lookup(&list, MotionKind::Main).enabled);

        let list = available(&MotionStack::new(), MeetingPhase::NotStarted, &ctx);
        assert_eq!(
            reason(&list, MotionKind::Main),
            "The meeting has not been called to order"
        );

        let stack = stack_of(&[(MotionKind::Main, MotionStatus::Debating)]);
        let list = available(&stack, MeetingPhase::Deliberation, &ctx);
        assert_eq!(reason(&list, MotionKind::Main), "Another question is pending");
    }

    #[test]
    fn test_subsidiaries_wait_for_second_except_amend() {
        let stack = stack_of(&[(MotionKind::Main, MotionStatus::PendingSecond)]);
        let list = available(&stack, MeetingPhase::Deliberation, &AvailabilityContext::default());
        assert!(lookup(&list, MotionKind::Amend).enabled);
        assert_eq!(
            reason(&list, MotionKind::Commit),
            "The pending question has not been stated and seconded"
        );
    }

    #[test]
    fn test_subsidiary_precedence() {
        let stack = stack_of(&[
            (MotionKind::Main, MotionStatus::Debating),
            (MotionKind::Commit, MotionStatus::Debating),
        ]);
        let list = available(&stack, MeetingPhase::Deliberation, &AvailabilityContext::default());
        assert_eq!(
            reason(&list, MotionKind::PostponeIndefinitely),
            "Only applies while the main motion is the immediately pending question"
        );
        assert_eq!(
            reason(&list, MotionKind::Commit),
            "Out of order while Commit is pending"
        );
        assert!(lookup(&list, MotionKind::PreviousQuestion).enabled);
        assert!(lookup(&list, MotionKind::LayOnTable).enabled);
    }

    #[test]
    fn test_amendment_degree_limit() {
        let stack = stack_of(&[
            (MotionKind::Main, MotionStatus::Debating),
            (MotionKind::Amend, MotionStatus::Debating),
            (MotionKind::Amend, MotionStatus::Debating),
        ]);
        let list = available(&stack, MeetingPhase::Deliberation, &AvailabilityContext::default());
        assert_eq!(
            reason(&list, MotionKind::Amend),
            "Amendments are limited to two degrees"
        );
    }

    #[test]
    fn test_subsidiaries_closed_during_vote() {
        let stack = stack_of(&[(MotionKind::Main, MotionStatus::Voting)]);
        let list = available(&stack, MeetingPhase::Deliberation, &AvailabilityContext::default());
        assert_eq!(reason(&list, MotionKind::Amend), "Main Motion is being voted on");
        assert!(lookup(&list, MotionKind::Division).enabled);
        assert_eq!(
            reason(&list, MotionKind::ObjectionToConsideration),
            "Only in order against a main motion before it is put to a vote"
        );
    }

    #[test]
    fn test_privileged_not_repeated() {
        let stack = stack_of(&[
            (MotionKind::Main, MotionStatus::Debating),
            (MotionKind::Recess, MotionStatus::Voting),
        ]);
        let list = available(&stack, MeetingPhase::Deliberation, &AvailabilityContext::default());
        assert_eq!(reason(&list, MotionKind::Recess), "Recess is already pending");
        assert!(lookup(&list, MotionKind::Adjourn).enabled);
    }

    #[test]
    fn test_appeal_needs_a_ruling() {
        let stack = MotionStack::new();
        let list = available(&stack, MeetingPhase::NewBusiness, &AvailabilityContext::default());
        assert_eq!(
            reason(&list, MotionKind::Appeal),
            "There is no ruling of the chair to appeal"
        );
        let ctx = AvailabilityContext {
            chair_ruling_pending: true,
            ..Default::default()
        };
        let list = available(&stack, MeetingPhase::NewBusiness, &ctx);
        assert!(lookup(&list, MotionKind::Appeal).enabled);
    }

    #[test]
    fn test_point_of_order_once() {
        let ctx = AvailabilityContext {
            point_of_order_raised: true,
            ..Default::default()
        };
        let list = available(&MotionStack::new(), MeetingPhase::NewBusiness, &ctx);
        assert_eq!(
            reason(&list, MotionKind::PointOfOrder),
            "A point of order is already pending"
        );
        assert!(lookup(&list, MotionKind::ParliamentaryInquiry).enabled);
    }

    #[test]
    fn test_bring_back_needs_history() {
        let list = available(
            &MotionStack::new(),
            MeetingPhase::NewBusiness,
            &AvailabilityContext::default(),
        );
        assert_eq!(
            reason(&list, MotionKind::TakeFromTable),
            "Nothing has been laid on the table"
        );
        assert_eq!(
            reason(&list, MotionKind::Rescind),
            "No adopted motion to rescind"
        );

        let ctx = AvailabilityContext {
            tabled_count: 1,
            reconsiderable_count: 1,
            ..Default::default()
        };
        let list = available(&MotionStack::new(), MeetingPhase::NewBusiness, &ctx);
        assert!(lookup(&list, MotionKind::TakeFromTable).enabled);
        assert!(lookup(&list, MotionKind::Reconsider).enabled);
    }

    #[test]
    fn test_everything_disabled_after_adjournment() {
        let list = available(
            &MotionStack::new(),
            MeetingPhase::Adjourned,
            &AvailabilityContext::default(),
        );
        assert!(list.iter().all(|a| !a.enabled));
        assert!(list
            .iter()
            .all(|a| a.reason.as_deref() == Some("The meeting has adjourned")));
    }
}
