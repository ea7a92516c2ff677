//! Resolving the pending question.
//!
//! [`resolve`] decides the outcome, pops the motion, restores the debate
//! context saved when it was pushed, records it in the decided history and
//! then applies the transition its effect handler describes. The input
//! state is never modified; any failure leaves the caller with the state
//! it already had.

use super::effects::{Transition, transition_for};
use crate::core::error::ProcedureError;
use crate::core::ids::MotionId;
use crate::debate::DebateContext;
use crate::meeting::{
    ChairRuling, DecidedMotion, DismissedProposal, MeetingPhase, MeetingState,
    SuspensionSnapshot, TabledUnit,
};
use crate::motion::{AmendmentRecord, Motion, MotionStack, MotionStatus, VoteThreshold};
use crate::quorum::{VoteOutcome, VotingContext, vote_result};
use std::collections::BTreeMap;

/// How the pending question is being decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Count the tally against the threshold
    Vote(VotingContext),
    /// The chair rules on a question that takes no vote
    Ruling(String),
}

/// A committed resolution, before the caller bumps the version
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub state: MeetingState,
    pub motion: Motion,
    pub outcome: VoteOutcome,
    pub transition: Transition,
}

pub fn resolve(
    state: &MeetingState,
    decision: &Decision,
    now: u64,
) -> Result<Resolution, ProcedureError> {
    let top = state.stack.top().ok_or(ProcedureError::NoPendingQuestion)?;
    let outcome = decide(top, decision)?;

    let mut next = state.clone();
    let mut motion = pop_pending(&mut next)?;
    motion.status = if outcome.is_adopted() {
        MotionStatus::Adopted
    } else {
        MotionStatus::Defeated
    };
    next.decided.push(DecidedMotion {
        motion: motion.clone(),
        result: motion.status,
        description: outcome.description.clone(),
        decided_at: now,
    });

    let transition = transition_for(&motion, &outcome);
    apply(&mut next, &motion, &transition, now)?;
    settle_phase(&mut next, now);

    Ok(Resolution {
        state: next,
        motion,
        outcome,
        transition,
    })
}

fn decide(top: &Motion, decision: &Decision) -> Result<VoteOutcome, ProcedureError> {
    match (top.vote_required, decision) {
        (VoteThreshold::ChairDecides, Decision::Ruling(ruling)) => {
            Ok(VoteOutcome::adopted(ruling.clone()))
        }
        (VoteThreshold::ChairDecides, Decision::Vote(_)) => {
            Err(ProcedureError::VoteNotApplicable(top.kind))
        }
        (_, Decision::Ruling(_)) => Err(ProcedureError::RulingNotApplicable(top.kind)),
        (threshold, Decision::Vote(context)) => Ok(vote_result(
            &top.votes,
            threshold,
            context.denominator_override(),
        )),
    }
}

/// Pop the pending question and restore the debate it interrupted
pub(crate) fn pop_pending(state: &mut MeetingState) -> Result<Motion, ProcedureError> {
    let (stack, popped) = state.stack.pop();
    let motion = popped.ok_or(ProcedureError::NoPendingQuestion)?;
    state.stack = stack;
    state.debate = state.checkpoints.remove(&motion.id).unwrap_or_default();
    Ok(motion)
}

/// Pop the pending question as withdrawn
pub(crate) fn withdraw_pending(
    state: &mut MeetingState,
    description: impl Into<String>,
    now: u64,
) -> Result<Motion, ProcedureError> {
    let mut motion = pop_pending(state)?;
    motion.status = MotionStatus::Withdrawn;
    state.decided.push(DecidedMotion {
        motion: motion.clone(),
        result: MotionStatus::Withdrawn,
        description: description.into(),
        decided_at: now,
    });
    Ok(motion)
}

/// Move between new business and deliberation after the stack changed
pub(crate) fn settle_phase(state: &mut MeetingState, now: u64) {
    if !state.phase.is_business() {
        return;
    }
    if state.stack.is_empty() {
        state.phase = MeetingPhase::NewBusiness;
        discard_queued(state, "No question remains pending", now);
    } else {
        state.phase = MeetingPhase::Deliberation;
    }
}

pub(crate) fn discard_queued(state: &mut MeetingState, reason: &str, now: u64) {
    let queued = std::mem::take(&mut state.queued);
    state
        .dismissed
        .extend(queued.into_entries().into_iter().map(|q| DismissedProposal {
            proposal: q.proposal,
            enqueued_at: q.enqueued_at,
            dismissed_at: now,
            reason: reason.to_string(),
        }));
}

fn apply(
    state: &mut MeetingState,
    motion: &Motion,
    transition: &Transition,
    now: u64,
) -> Result<(), ProcedureError> {
    match transition {
        Transition::Resume => {}
        Transition::MergeAmendment {
            target,
            proposed_text,
        } => {
            let amended = state
                .stack
                .find_mut(target)
                .ok_or_else(|| ProcedureError::NoSuchTarget(target.to_string()))?;
            amended.metadata.amendment_history.push(AmendmentRecord {
                amendment_id: motion.id.clone(),
                amendment_text: motion.text.clone(),
                proposed_text: proposed_text.clone(),
                previous_text: amended.text.clone(),
                adopted_at: now,
            });
            amended.text = proposed_text.clone();
        }
        Transition::ForceVote => {
            if let Some(top) = state.stack.top_mut() {
                top.start_voting(now);
            }
            state.debate.queue.clear();
            state.debate.current_speaker = None;
        }
        Transition::ArchiveStack { status } => archive_stack(state, motion, *status, now),
        Transition::DiscardStack => discard_stack(state, motion, now),
        Transition::AttachDebateLimits { limits } => {
            if let Some(top) = state.stack.top_mut() {
                top.metadata.debate_limits = Some(*limits);
            }
        }
        Transition::Adjourn => {
            state.phase = MeetingPhase::Adjourned;
            discard_queued(state, "The meeting adjourned", now);
        }
        Transition::Recess { minutes } => {
            state.phase = MeetingPhase::Recess {
                ends_at: now + u64::from(*minutes) * 60_000,
            };
        }
        Transition::SuspendRules { purpose } => {
            state.suspension = Some(SuspensionSnapshot {
                stack: std::mem::take(&mut state.stack),
                debate: std::mem::take(&mut state.debate),
                checkpoints: std::mem::take(&mut state.checkpoints),
                purpose: purpose.clone(),
                suspended_at: now,
            });
            state.phase = MeetingPhase::RulesSuspended;
        }
        Transition::RecordRuling { ruling } => {
            state.chair_ruling = Some(ChairRuling {
                ruling: ruling.clone(),
                motion_id: Some(motion.id.clone()),
                issued_at: now,
            });
        }
        Transition::ClearRuling => state.chair_ruling = None,
        Transition::Revote => {
            if let Some(top) = state.stack.top_mut() {
                top.clear_votes();
                top.start_voting(now);
            }
        }
        Transition::WithdrawPending => {
            let target = motion.applied_to.as_ref();
            if state.stack.top().map(|m| &m.id) != target {
                return Err(ProcedureError::NoSuchTarget(
                    target.map(MotionId::to_string).unwrap_or_default(),
                ));
            }
            withdraw_pending(state, format!("Withdrawn by motion {}", motion.id), now)?;
        }
        Transition::TakeFromTable { target } => take_from_table(state, target.as_ref(), now)?,
        Transition::Reconsider { target } => reconsider(state, target.as_ref(), now)?,
        Transition::Rescind { target } => {
            let id = state
                .adopted()
                .filter(|d| target.as_ref().is_none_or(|t| &d.motion.id == t))
                .last()
                .map(|d| d.motion.id.clone())
                .ok_or_else(|| no_such_target(target.as_ref(), "adopted motions"))?;
            state.rescinded.insert(id);
        }
        Transition::FixAdjournTime { at } => state.adjourn_at = *at,
    }
    Ok(())
}

fn no_such_target(target: Option<&MotionId>, history: &str) -> ProcedureError {
    ProcedureError::NoSuchTarget(match target {
        Some(id) => id.to_string(),
        None => history.to_string(),
    })
}

/// Everything removed from the floor by [`unwind_stack`]
struct UnwoundStack {
    /// Bottom-first
    motions: Vec<Motion>,
    /// Debate on the top question
    debate: DebateContext,
    /// Checkpoints of every motion but the bottom one
    checkpoints: BTreeMap<MotionId, DebateContext>,
}

/// Remove every remaining motion and restore the debate from before the bottom one
fn unwind_stack(state: &mut MeetingState) -> UnwoundStack {
    let (stack, motions) = state.stack.truncate_from(0);
    state.stack = stack;
    let mut checkpoints = BTreeMap::new();
    for m in &motions {
        if let Some(saved) = state.checkpoints.remove(&m.id) {
            checkpoints.insert(m.id.clone(), saved);
        }
    }
    let debate = match motions.first() {
        Some(bottom) => {
            let before = checkpoints.remove(&bottom.id).unwrap_or_default();
            std::mem::replace(&mut state.debate, before)
        }
        None => DebateContext::default(),
    };
    UnwoundStack {
        motions,
        debate,
        checkpoints,
    }
}

fn archive_stack(state: &mut MeetingState, motion: &Motion, status: MotionStatus, now: u64) {
    let UnwoundStack {
        mut motions,
        mut debate,
        checkpoints,
    } = unwind_stack(state);
    if motions.is_empty() {
        return;
    }
    for m in &mut motions {
        m.status = status;
    }
    if let Some(speaker) = debate.current_speaker.clone() {
        debate.end_speech(&speaker.participant, now);
    }
    state.tabled.push(TabledUnit {
        motions,
        status,
        archived_by: motion.id.clone(),
        postpone_until: motion.metadata.postpone_until.clone(),
        committee: motion.metadata.committee.clone(),
        archived_at: now,
        debate,
        checkpoints,
    });
}

fn discard_stack(state: &mut MeetingState, motion: &Motion, now: u64) {
    for mut removed in unwind_stack(state).motions {
        removed.status = MotionStatus::Defeated;
        state.decided.push(DecidedMotion {
            motion: removed,
            result: MotionStatus::Defeated,
            description: format!("Disposed of by {}", motion.kind),
            decided_at: now,
        });
    }
}

fn take_from_table(
    state: &mut MeetingState,
    target: Option<&MotionId>,
    now: u64,
) -> Result<(), ProcedureError> {
    let index = match target {
        Some(id) => state.tabled.iter().rposition(|u| u.contains(id)),
        None => state.tabled.len().checked_sub(1),
    }
    .ok_or_else(|| no_such_target(target, "tabled motions"))?;

    let unit = state.tabled.remove(index);
    let bottom = unit.motions.first().map(|m| m.id.clone());
    let motions = unit
        .motions
        .into_iter()
        .map(|mut m| {
            m.clear_votes();
            m.open(now);
            m
        })
        .collect();
    state.stack = MotionStack::from_motions(motions);
    if let Some(bottom) = bottom {
        let before = std::mem::take(&mut state.debate);
        state.checkpoints.insert(bottom, before);
    }
    state.checkpoints.extend(unit.checkpoints);
    state.debate = unit.debate;
    Ok(())
}

fn reconsider(
    state: &mut MeetingState,
    target: Option<&MotionId>,
    now: u64,
) -> Result<(), ProcedureError> {
    let mut motion = state
        .reconsiderable()
        .filter(|d| target.is_none_or(|t| &d.motion.id == t))
        .last()
        .map(|d| d.motion.clone())
        .ok_or_else(|| no_such_target(target, "decided motions"))?;

    motion.clear_votes();
    motion.open(now);
    let id = motion.id.clone();
    state.stack = state.stack.push(motion)?;
    let before = std::mem::take(&mut state.debate);
    state.checkpoints.insert(id, before);
    Ok(())
}
