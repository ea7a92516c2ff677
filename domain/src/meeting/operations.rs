//! Engine operations.
//!
//! Each operation validates completely against `&self`, then builds and
//! returns the next state. Errors leave nothing half-applied because the
//! caller still holds the state it passed in.

use super::phase::MeetingPhase;
use super::queued::DismissedProposal;
use super::state::{ChairRuling, DecidedMotion, MeetingState};
use crate::availability::availability_of;
use crate::core::error::ProcedureError;
use crate::core::ids::{MotionId, RequestId};
use crate::core::participant::Actor;
use crate::debate::{
    CurrentSpeaker, DebateConstraints, DebateContext, SpeakingQueueEntry, Speech, Stance,
    can_speak, constraints, debate_time_expired, sort_queue, speech_expired,
};
use crate::disposition::dispatcher::{discard_queued, pop_pending, settle_phase, withdraw_pending};
use crate::disposition::{Decision, resolve};
use crate::motion::{
    Motion, MotionCategory, MotionFactory, MotionKind, MotionProposal, MotionStatus, VoteChoice,
};
use crate::quorum::VotingContext;
use crate::request::{PendingRequest, RequestStatus, RequestType};

fn require_chair(actor: &Actor, action: &'static str) -> Result<(), ProcedureError> {
    if actor.is_chair() {
        Ok(())
    } else {
        Err(ProcedureError::ChairOnly(action))
    }
}

fn require_debate_time(
    debate: &DebateContext,
    limits: &DebateConstraints,
    now: u64,
) -> Result<(), ProcedureError> {
    match limits.total_time_limit_secs {
        Some(limit_secs) if debate_time_expired(debate, limits, now) => {
            Err(ProcedureError::DebateTimeExpired { limit_secs })
        }
        _ => Ok(()),
    }
}

fn invalid_phase(operation: &'static str, phase: MeetingPhase) -> ProcedureError {
    ProcedureError::InvalidPhase {
        operation,
        phase: phase.to_string(),
    }
}

impl MeetingState {
    fn require_present(&self, member: &str) -> Result<(), ProcedureError> {
        if self.is_present(member) {
            Ok(())
        } else {
            Err(ProcedureError::NotPresent(member.to_string()))
        }
    }

    /// The pending question is handled only while the meeting conducts
    /// business. In a recess or while the rules are suspended, an incidental
    /// question raised in the meantime may still be disposed of.
    fn require_business(&self, operation: &'static str) -> Result<(), ProcedureError> {
        if self.phase.is_business() {
            return Ok(());
        }
        let incidental = self
            .stack
            .top()
            .is_some_and(|m| m.category == MotionCategory::Incidental);
        if self.phase.is_in_session() && incidental {
            Ok(())
        } else {
            Err(invalid_phase(operation, self.phase))
        }
    }

    fn require_floor_free(&self) -> Result<(), ProcedureError> {
        match self.debate.floor_holder() {
            Some(holder) => Err(ProcedureError::FloorHeld(holder.to_string())),
            None => Ok(()),
        }
    }

    fn pending_with_status(&self, expected: MotionStatus) -> Result<&Motion, ProcedureError> {
        let top = self.stack.top().ok_or(ProcedureError::NoPendingQuestion)?;
        if top.status != expected {
            return Err(ProcedureError::UnexpectedStatus {
                expected,
                actual: top.status,
            });
        }
        Ok(top)
    }

    fn request_index(&self, id: &RequestId) -> Result<usize, ProcedureError> {
        self.requests
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| ProcedureError::RequestNotFound(id.clone()))
    }

    /// Create the motion and push it, checkpointing the debate it interrupts
    fn place_motion(&mut self, proposal: MotionProposal, now: u64) -> Result<MotionId, ProcedureError> {
        let check = availability_of(
            proposal.kind,
            &self.stack,
            self.phase,
            &self.availability_context(),
        );
        if !check.enabled {
            return Err(ProcedureError::NotInOrder {
                kind: proposal.kind,
                reason: check.reason.unwrap_or_default(),
            });
        }

        let id = self.next_motion_id();
        let motion = MotionFactory::create(id.clone(), &proposal, &self.stack, now);
        self.stack = self.stack.push(motion)?;
        let interrupted = std::mem::take(&mut self.debate);
        self.checkpoints.insert(id.clone(), interrupted);
        if self.phase == MeetingPhase::NewBusiness {
            self.phase = MeetingPhase::Deliberation;
        }
        Ok(id)
    }

    // ==================== Attendance ====================

    pub fn mark_present(&self, actor: &Actor, member: &str, now: u64) -> Result<MeetingState, ProcedureError> {
        if !actor.is_chair() && actor.name != member {
            return Err(ProcedureError::ChairOnly("record attendance for another member"));
        }
        if self.phase == MeetingPhase::Adjourned {
            return Err(invalid_phase("record attendance", self.phase));
        }
        let mut next = self.clone();
        next.roster.insert(member.to_string());
        next.present.insert(member.to_string());
        next.commit(&actor.name, "attendance", format!("{} is present", member), now);
        Ok(next)
    }

    pub fn mark_absent(&self, actor: &Actor, member: &str, now: u64) -> Result<MeetingState, ProcedureError> {
        if !actor.is_chair() && actor.name != member {
            return Err(ProcedureError::ChairOnly("record attendance for another member"));
        }
        if self.phase == MeetingPhase::Adjourned {
            return Err(invalid_phase("record attendance", self.phase));
        }
        self.require_present(member)?;
        let mut next = self.clone();
        next.present.remove(member);
        next.debate.queue.retain(|e| e.participant != member);
        next.commit(&actor.name, "attendance", format!("{} has left", member), now);
        Ok(next)
    }

    pub fn call_to_order(&self, actor: &Actor, now: u64) -> Result<MeetingState, ProcedureError> {
        require_chair(actor, "call the meeting to order")?;
        if self.phase != MeetingPhase::NotStarted {
            return Err(invalid_phase("call to order", self.phase));
        }
        let present = self.present_count();
        let required = self.settings.quorum.resolve(self.participant_count());
        if present < required {
            return Err(ProcedureError::QuorumNotMet { present, required });
        }
        let mut next = self.clone();
        next.phase = MeetingPhase::NewBusiness;
        next.commit(
            &actor.name,
            "call_to_order",
            format!(
                "Meeting called to order with {} present (quorum {}, {})",
                present, required, self.settings.quorum
            ),
            now,
        );
        Ok(next)
    }

    /// Adjourn if a time fixed by Fix Time to Adjourn has passed.
    ///
    /// Returns `None` when nothing is due.
    pub fn scheduled_adjournment(&self, now: u64) -> Option<MeetingState> {
        let at = self.adjourn_at?;
        if now < at || !self.phase.is_in_session() {
            return None;
        }
        let mut next = self.clone();
        next.phase = MeetingPhase::Adjourned;
        discard_queued(&mut next, "The meeting adjourned", now);
        next.commit("chair", "adjourned", "Adjourned at the time fixed by the assembly", now);
        Some(next)
    }

    // ==================== Motions ====================

    /// Make a motion, or queue it if someone else holds the floor and the
    /// motion cannot interrupt.
    pub fn propose_motion(
        &self,
        actor: &Actor,
        mut proposal: MotionProposal,
        now: u64,
    ) -> Result<MeetingState, ProcedureError> {
        self.require_present(&actor.name)?;
        proposal.mover = actor.name.clone();

        let check = availability_of(
            proposal.kind,
            &self.stack,
            self.phase,
            &self.availability_context(),
        );
        if !check.enabled {
            return Err(ProcedureError::NotInOrder {
                kind: proposal.kind,
                reason: check.reason.unwrap_or_default(),
            });
        }

        let mut next = self.clone();
        if let Some(holder) = self.debate.floor_holder()
            && holder != actor.name
            && !proposal.kind.rules().can_interrupt
        {
            let message = format!("{} queued {} while {} holds the floor", actor.name, proposal.kind, holder);
            next.queued = next.queued.enqueue(proposal, now);
            next.commit(&actor.name, "motion_queued", message, now);
            return Ok(next);
        }

        let message = format!("{} moved {}: {}", actor.name, proposal.kind, proposal.text);
        let id = next.place_motion(proposal, now)?;
        next.commit(&actor.name, "motion_made", format!("[{}] {}", id, message), now);
        Ok(next)
    }

    /// Promote a queued proposal onto the stack.
    ///
    /// Callers must serialize recognition attempts for the same index.
    pub fn recognize_queued(&self, actor: &Actor, index: usize, now: u64) -> Result<MeetingState, ProcedureError> {
        require_chair(actor, "recognize a queued motion")?;
        self.require_floor_free()?;
        let (queued, entry) = self.queued.take(index)?;

        let mut next = self.clone();
        next.queued = queued;
        let message = format!(
            "{} recognized for {}: {}",
            entry.proposal.mover, entry.proposal.kind, entry.proposal.text
        );
        let id = next.place_motion(entry.proposal, now)?;
        next.commit(&actor.name, "queued_motion_recognized", format!("[{}] {}", id, message), now);
        Ok(next)
    }

    pub fn dismiss_queued(
        &self,
        actor: &Actor,
        index: usize,
        reason: &str,
        now: u64,
    ) -> Result<MeetingState, ProcedureError> {
        require_chair(actor, "dismiss a queued motion")?;
        let (queued, entry) = self.queued.take(index)?;

        let mut next = self.clone();
        next.queued = queued;
        let message = format!("{} by {} dismissed: {}", entry.proposal.kind, entry.proposal.mover, reason);
        next.dismissed.push(DismissedProposal {
            proposal: entry.proposal,
            enqueued_at: entry.enqueued_at,
            dismissed_at: now,
            reason: reason.to_string(),
        });
        next.commit(&actor.name, "queued_motion_dismissed", message, now);
        Ok(next)
    }

    /// The chair states the question
    pub fn accept_motion(&self, actor: &Actor, now: u64) -> Result<MeetingState, ProcedureError> {
        require_chair(actor, "state the question")?;
        self.require_business("state the question")?;
        self.pending_with_status(MotionStatus::PendingChair)?;

        let mut next = self.clone();
        let top = next.stack.top_mut().ok_or(ProcedureError::NoPendingQuestion)?;
        if top.requires_second {
            top.status = MotionStatus::PendingSecond;
        } else {
            top.open(now);
        }
        let message = format!("{} stated the question on {} ({})", actor.name, top.kind, top.status);
        next.commit(&actor.name, "motion_accepted", message, now);
        Ok(next)
    }

    /// The chair rules the pending question out of order
    pub fn decline_motion(&self, actor: &Actor, reason: &str, now: u64) -> Result<MeetingState, ProcedureError> {
        require_chair(actor, "rule a motion out of order")?;
        self.require_business("rule a motion out of order")?;
        if self.stack.is_empty() {
            return Err(ProcedureError::NoPendingQuestion);
        }

        let mut next = self.clone();
        let mut motion = pop_pending(&mut next)?;
        motion.status = MotionStatus::Defeated;
        next.chair_ruling = Some(ChairRuling {
            ruling: reason.to_string(),
            motion_id: Some(motion.id.clone()),
            issued_at: now,
        });
        let message = format!("{} ruled out of order: {}", motion.kind, reason);
        next.decided.push(DecidedMotion {
            motion,
            result: MotionStatus::Defeated,
            description: format!("Ruled out of order: {}", reason),
            decided_at: now,
        });
        settle_phase(&mut next, now);
        next.commit(&actor.name, "motion_declined", message, now);
        Ok(next)
    }

    pub fn second_motion(&self, actor: &Actor, now: u64) -> Result<MeetingState, ProcedureError> {
        self.require_business("second a motion")?;
        self.require_present(&actor.name)?;
        let top = self.pending_with_status(MotionStatus::PendingSecond)?;
        if top.mover == actor.name {
            return Err(ProcedureError::CannotSecondOwnMotion);
        }

        let mut next = self.clone();
        let top = next.stack.top_mut().ok_or(ProcedureError::NoPendingQuestion)?;
        top.seconder = Some(actor.name.clone());
        top.open(now);
        let message = format!("{} seconded {}", actor.name, top.kind);
        next.commit(&actor.name, "motion_seconded", message, now);
        Ok(next)
    }

    // ==================== Debate ====================

    pub fn request_floor(&self, actor: &Actor, stance: Stance, now: u64) -> Result<MeetingState, ProcedureError> {
        let member = actor.name.as_str();
        self.require_business("request the floor")?;
        self.require_present(member)?;
        if self.debate.is_queued(member) || self.debate.floor_holder() == Some(member) {
            return Err(ProcedureError::AlreadyQueued(member.to_string()));
        }

        let permission = can_speak(&self.stack, member, &self.debate.history, &self.settings.debate);
        if !permission.allowed {
            return Err(match self.stack.top() {
                None => ProcedureError::NoPendingQuestion,
                Some(top) if !top.is_debatable || top.status != MotionStatus::Debating => {
                    ProcedureError::DebateClosed
                }
                Some(_) => ProcedureError::SpeechLimitReached {
                    member: member.to_string(),
                    limit: constraints(&self.stack, &self.settings.debate).max_speeches_per_member,
                },
            });
        }
        let limits = constraints(&self.stack, &self.settings.debate);
        require_debate_time(&self.debate, &limits, now)?;

        let mut entry = SpeakingQueueEntry::new(member, stance, now);
        if let Some(last) = self.debate.last_spoke(member) {
            entry = entry.spoken_at(last);
        }

        let mut next = self.clone();
        next.debate.queue.push(entry);
        let mover = next.stack.top().map(|m| m.mover.clone());
        next.debate.queue = sort_queue(&next.debate.queue, mover.as_deref());
        next.commit(member, "floor_requested", format!("{} asked to speak ({})", member, stance), now);
        Ok(next)
    }

    /// Give the floor to the head of the sorted speaking queue.
    ///
    /// A speaker whose time has run out is replaced.
    pub fn recognize_speaker(&self, actor: &Actor, now: u64) -> Result<MeetingState, ProcedureError> {
        require_chair(actor, "recognize a speaker")?;
        self.require_business("recognize a speaker")?;
        self.pending_with_status(MotionStatus::Debating)
            .map_err(|_| ProcedureError::DebateClosed)?;

        let limits = constraints(&self.stack, &self.settings.debate);
        let replaced = match &self.debate.current_speaker {
            Some(speaker) if speech_expired(speaker, &limits, now) => Some(speaker.participant.clone()),
            Some(speaker) => return Err(ProcedureError::FloorHeld(speaker.participant.clone())),
            None => None,
        };
        let mut debate = self.debate.clone();
        if let Some(member) = &replaced {
            debate.end_speech(member, now);
        }
        require_debate_time(&debate, &limits, now)?;

        let mover = self.stack.top().map(|m| m.mover.as_str());
        let mut queue = sort_queue(&debate.queue, mover);
        if queue.is_empty() {
            return Err(ProcedureError::SpeakingQueueEmpty);
        }
        let head = queue.remove(0);

        debate.queue = queue;
        debate.history.push(Speech {
            participant: head.participant.clone(),
            stance: head.stance,
            started_at: now,
            ended_at: None,
        });
        debate.current_speaker = Some(CurrentSpeaker {
            participant: head.participant.clone(),
            stance: head.stance,
            started_at: now,
        });
        let message = match replaced {
            Some(previous) => format!(
                "{} has the floor ({}); time expired for {}",
                head.participant, head.stance, previous
            ),
            None => format!("{} has the floor ({})", head.participant, head.stance),
        };

        let mut next = self.clone();
        next.debate = debate;
        next.commit(&actor.name, "speaker_recognized", message, now);
        Ok(next)
    }

    /// End the current speech; the speaker or the chair may do this
    pub fn yield_floor(&self, actor: &Actor, now: u64) -> Result<MeetingState, ProcedureError> {
        if !self.phase.is_in_session() {
            return Err(invalid_phase("yield the floor", self.phase));
        }
        let speaker = self
            .debate
            .current_speaker
            .as_ref()
            .ok_or(ProcedureError::FloorVacant)?;
        if speaker.participant != actor.name && !actor.is_chair() {
            return Err(ProcedureError::FloorHeld(speaker.participant.clone()));
        }

        let limits = constraints(&self.stack, &self.settings.debate);
        let expired = speech_expired(speaker, &limits, now);
        let message = if expired {
            format!("{} yielded the floor (time expired)", speaker.participant)
        } else {
            format!("{} yielded the floor", speaker.participant)
        };

        let mut next = self.clone();
        next.debate.end_speech(&speaker.participant, now);
        next.commit(&actor.name, "floor_yielded", message, now);
        Ok(next)
    }

    // ==================== Voting ====================

    pub fn open_vote(&self, actor: &Actor, now: u64) -> Result<MeetingState, ProcedureError> {
        require_chair(actor, "put the question to a vote")?;
        self.require_business("put the question to a vote")?;
        let top = self.pending_with_status(MotionStatus::Debating)?;
        if !top.vote_required.is_voted() {
            return Err(ProcedureError::VoteNotApplicable(top.kind));
        }
        self.require_floor_free()?;

        let mut next = self.clone();
        let top = next.stack.top_mut().ok_or(ProcedureError::NoPendingQuestion)?;
        top.start_voting(now);
        let message = format!("Question put on {}: {}", top.kind, top.text);
        next.debate.queue.clear();
        next.commit(&actor.name, "vote_opened", message, now);
        Ok(next)
    }

    pub fn cast_vote(&self, actor: &Actor, choice: VoteChoice, now: u64) -> Result<MeetingState, ProcedureError> {
        self.require_business("vote")?;
        let top = self.stack.top().ok_or(ProcedureError::NoPendingQuestion)?;
        if top.status != MotionStatus::Voting {
            return Err(ProcedureError::VoteNotOpen);
        }
        if !top.vote_required.is_voted() {
            return Err(ProcedureError::VoteNotApplicable(top.kind));
        }
        self.require_present(&actor.name)?;
        if top.has_voted(&actor.name) {
            return Err(ProcedureError::AlreadyVoted(actor.name.clone()));
        }

        let mut next = self.clone();
        let top = next.stack.top_mut().ok_or(ProcedureError::NoPendingQuestion)?;
        top.record_vote(actor.name.clone(), choice);
        next.commit(&actor.name, "vote_cast", format!("{} voted", actor.name), now);
        Ok(next)
    }

    /// Close the vote and resolve the pending question.
    ///
    /// Without an explicit context the configured basis is used with the
    /// current attendance.
    pub fn close_vote(
        &self,
        actor: &Actor,
        context: Option<VotingContext>,
        now: u64,
    ) -> Result<MeetingState, ProcedureError> {
        require_chair(actor, "close the vote")?;
        self.require_business("close the vote")?;
        let top = self.stack.top().ok_or(ProcedureError::NoPendingQuestion)?;
        if top.status != MotionStatus::Voting {
            return Err(ProcedureError::VoteNotOpen);
        }
        if !top.vote_required.is_voted() {
            return Err(ProcedureError::VoteNotApplicable(top.kind));
        }

        let elapsed = now.saturating_sub(top.voting_opened_at.unwrap_or(now));
        let silent: Vec<String> = self
            .present
            .iter()
            .filter(|m| !top.has_voted(m))
            .cloned()
            .collect();
        let everyone_voted = !self.present.is_empty() && silent.is_empty();
        if !everyone_voted && elapsed < self.settings.early_close_ms {
            return Err(ProcedureError::VoteStillOpen {
                remaining_ms: self.settings.early_close_ms - elapsed,
            });
        }

        let mut counted = self.clone();
        if elapsed >= self.settings.abstention_window_ms
            && let Some(top) = counted.stack.top_mut()
        {
            for member in silent {
                top.record_vote(member, VoteChoice::Abstain);
            }
        }

        let context = context.unwrap_or_else(|| {
            VotingContext::new(
                self.settings.voting_basis,
                self.present_count(),
                self.participant_count(),
            )
        });
        let resolution = resolve(&counted, &Decision::Vote(context), now)?;
        let mut next = resolution.state;
        next.commit(
            &actor.name,
            "vote_closed",
            format!("{}: {}", resolution.motion.kind, resolution.outcome.description),
            now,
        );
        Ok(next)
    }

    /// Decide a question that takes no vote
    pub fn rule(&self, actor: &Actor, ruling: &str, now: u64) -> Result<MeetingState, ProcedureError> {
        require_chair(actor, "rule on the question")?;
        self.require_business("rule on the question")?;
        let resolution = resolve(self, &Decision::Ruling(ruling.to_string()), now)?;
        let mut next = resolution.state;
        next.commit(
            &actor.name,
            "ruling",
            format!("{}: {}", resolution.motion.kind, resolution.outcome.description),
            now,
        );
        Ok(next)
    }

    // ==================== Requests ====================

    pub fn raise_request(
        &self,
        actor: &Actor,
        request_type: RequestType,
        content: &str,
        now: u64,
    ) -> Result<MeetingState, ProcedureError> {
        if !self.phase.is_in_session() {
            return Err(invalid_phase("raise a request", self.phase));
        }
        self.require_present(&actor.name)?;
        if let Some(holder) = self.debate.floor_holder()
            && holder != actor.name
            && !request_type.can_interrupt()
        {
            return Err(ProcedureError::FloorHeld(holder.to_string()));
        }
        let target = match request_type {
            RequestType::PointOfOrder => {
                let check = availability_of(
                    MotionKind::PointOfOrder,
                    &self.stack,
                    self.phase,
                    &self.availability_context(),
                );
                if !check.enabled {
                    return Err(ProcedureError::NotInOrder {
                        kind: MotionKind::PointOfOrder,
                        reason: check.reason.unwrap_or_default(),
                    });
                }
                None
            }
            RequestType::WithdrawMotion => {
                let top = self.stack.top().ok_or(ProcedureError::NoPendingQuestion)?;
                if top.mover != actor.name {
                    return Err(ProcedureError::NotMover);
                }
                Some(top.id.clone())
            }
            _ => None,
        };

        let mut next = self.clone();
        let id = next.next_request_id();
        let mut request = PendingRequest::create(id.clone(), request_type, actor.name.clone(), content, now)?;
        if let Some(target) = target {
            request = request.with_target(target);
        }
        next.requests.push(request);
        next.commit(
            &actor.name,
            "request_raised",
            format!("[{}] {} raised {}", id, actor.name, request_type),
            now,
        );
        Ok(next)
    }

    /// Accept a request; an accepted withdrawal takes effect immediately
    pub fn accept_request(&self, actor: &Actor, id: &RequestId, now: u64) -> Result<MeetingState, ProcedureError> {
        require_chair(actor, "accept a request")?;
        let index = self.request_index(id)?;
        let accepted = self.requests[index].accept()?;

        let mut next = self.clone();
        if accepted.request_type == RequestType::WithdrawMotion {
            self.require_business("withdraw a motion")?;
            let top = self.stack.top().ok_or(ProcedureError::NoPendingQuestion)?;
            if let Some(target) = &accepted.target
                && &top.id != target
            {
                return Err(ProcedureError::NoLongerPending(target.clone()));
            }
            if top.mover != accepted.raised_by {
                return Err(ProcedureError::NotMover);
            }
            withdraw_pending(&mut next, format!("Withdrawn by {}", accepted.raised_by), now)?;
            settle_phase(&mut next, now);
        }
        let message = format!("[{}] {} accepted", id, accepted.request_type);
        next.requests[index] = accepted;
        next.commit(&actor.name, "request_accepted", message, now);
        Ok(next)
    }

    pub fn respond_request(
        &self,
        actor: &Actor,
        id: &RequestId,
        response: &str,
        now: u64,
    ) -> Result<MeetingState, ProcedureError> {
        require_chair(actor, "respond to a request")?;
        let index = self.request_index(id)?;
        let responded = self.requests[index].respond(response)?;

        let mut next = self.clone();
        next.requests[index] = responded;
        next.commit(&actor.name, "request_responded", format!("[{}] {}", id, response), now);
        Ok(next)
    }

    /// The chair, or the member who raised it, drops a request
    pub fn dismiss_request(&self, actor: &Actor, id: &RequestId, now: u64) -> Result<MeetingState, ProcedureError> {
        let index = self.request_index(id)?;
        let request = &self.requests[index];
        if !actor.is_chair() && request.raised_by != actor.name {
            return Err(ProcedureError::ChairOnly("dismiss another member's request"));
        }
        let dismissed = request.dismiss()?;

        let mut next = self.clone();
        next.requests[index] = dismissed;
        next.commit(&actor.name, "request_dismissed", format!("[{}] dismissed", id), now);
        Ok(next)
    }

    /// Refer a point of order or question of privilege to the assembly as a motion
    pub fn escalate_request(&self, actor: &Actor, id: &RequestId, now: u64) -> Result<MeetingState, ProcedureError> {
        require_chair(actor, "escalate a request")?;
        let index = self.request_index(id)?;
        let request = &self.requests[index];
        let kind = request
            .request_type
            .escalates_to()
            .ok_or(ProcedureError::NotEscalatable(request.request_type))?;

        let accepted = if request.status == RequestStatus::Pending {
            request.accept()?
        } else {
            request.clone()
        };
        let responded = accepted.respond(format!("Referred to the assembly as {}", kind))?;

        let mut next = self.clone();
        next.requests[index] = responded;
        let proposal = MotionProposal::new(kind, request.content.clone(), request.raised_by.clone());
        let motion_id = next.place_motion(proposal, now)?;
        next.commit(
            &actor.name,
            "request_escalated",
            format!("[{}] became motion {}", id, motion_id),
            now,
        );
        Ok(next)
    }

    // ==================== Modes ====================

    /// Resume business after a recess; the chair may end it early
    pub fn end_recess(&self, actor: &Actor, now: u64) -> Result<MeetingState, ProcedureError> {
        let MeetingPhase::Recess { ends_at } = self.phase else {
            return Err(invalid_phase("end a recess", self.phase));
        };
        if now < ends_at && !actor.is_chair() {
            return Err(ProcedureError::RecessNotOver {
                remaining_ms: ends_at - now,
            });
        }

        let mut next = self.clone();
        next.phase = if next.stack.is_empty() {
            MeetingPhase::NewBusiness
        } else {
            MeetingPhase::Deliberation
        };
        next.commit(&actor.name, "recess_ended", "The meeting resumed after recess", now);
        Ok(next)
    }

    /// Return to regular order, restoring the business set aside
    pub fn restore_rules(&self, actor: &Actor, now: u64) -> Result<MeetingState, ProcedureError> {
        require_chair(actor, "restore the rules")?;
        if self.phase != MeetingPhase::RulesSuspended {
            return Err(invalid_phase("restore the rules", self.phase));
        }
        if let Some(top) = self.stack.top() {
            return Err(ProcedureError::NotInOrder {
                kind: MotionKind::SuspendRules,
                reason: format!("{} must be disposed of first", top.kind),
            });
        }

        let mut next = self.clone();
        if let Some(snapshot) = next.suspension.take() {
            next.stack = snapshot.stack;
            next.debate = snapshot.debate;
            next.checkpoints = snapshot.checkpoints;
        }
        next.phase = if next.stack.is_empty() {
            MeetingPhase::NewBusiness
        } else {
            MeetingPhase::Deliberation
        };
        next.commit(&actor.name, "rules_restored", "Regular order restored", now);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{DebateLimits, MotionMetadata};
    use crate::quorum::QuorumRule;
    use crate::settings::ProcedureSettings;

    fn chair() -> Actor {
        Actor::chair("chair")
    }

    fn member(name: &str) -> Actor {
        Actor::member(name)
    }

    /// Called to order with chair, alice, bob and carol present
    fn in_session() -> MeetingState {
        let mut state = MeetingState::new("board", ProcedureSettings::default());
        for name in ["chair", "alice", "bob", "carol"] {
            state = state.mark_present(&chair(), name, 0).unwrap();
        }
        state.call_to_order(&chair(), 0).unwrap()
    }

    fn main_motion(text: &str) -> MotionProposal {
        MotionProposal::new(MotionKind::Main, text, "alice")
    }

    /// Main motion by alice, stated and seconded by bob
    fn debating() -> MeetingState {
        in_session()
            .propose_motion(&member("alice"), main_motion("allocate $500"), 10)
            .unwrap()
            .accept_motion(&chair(), 20)
            .unwrap()
            .second_motion(&member("bob"), 30)
            .unwrap()
    }

    #[test]
    fn test_call_to_order_requires_quorum() {
        let settings = ProcedureSettings::default()
            .with_quorum(QuorumRule::FixedNumber(3))
            .with_total_membership(10);
        let state = MeetingState::new("board", settings)
            .mark_present(&chair(), "chair", 0)
            .unwrap();
        assert_eq!(
            state.call_to_order(&chair(), 0).unwrap_err(),
            ProcedureError::QuorumNotMet {
                present: 1,
                required: 3
            }
        );
        assert_eq!(
            state.call_to_order(&member("chair2"), 0).unwrap_err(),
            ProcedureError::ChairOnly("call the meeting to order")
        );
    }

    #[test]
    fn test_motion_lifecycle_to_debate() {
        let state = in_session()
            .propose_motion(&member("alice"), main_motion("allocate $500"), 10)
            .unwrap();
        assert_eq!(state.phase, MeetingPhase::Deliberation);
        assert_eq!(state.stack.top().unwrap().status, MotionStatus::PendingChair);

        let state = state.accept_motion(&chair(), 20).unwrap();
        assert_eq!(state.stack.top().unwrap().status, MotionStatus::PendingSecond);
        assert_eq!(
            state.second_motion(&member("alice"), 25).unwrap_err(),
            ProcedureError::CannotSecondOwnMotion
        );

        let state = state.second_motion(&member("bob"), 30).unwrap();
        let top = state.stack.top().unwrap();
        assert_eq!(top.status, MotionStatus::Debating);
        assert_eq!(top.seconder.as_deref(), Some("bob"));
    }

    #[test]
    fn test_member_cannot_state_the_question() {
        let state = in_session()
            .propose_motion(&member("alice"), main_motion("allocate $500"), 10)
            .unwrap();
        assert_eq!(
            state.accept_motion(&member("bob"), 20).unwrap_err(),
            ProcedureError::ChairOnly("state the question")
        );
    }

    #[test]
    fn test_every_operation_bumps_version_and_logs() {
        let start = in_session();
        let state = debating();
        assert_eq!(state.version, start.version + 3);
        assert_eq!(state.log.len(), start.log.len() + 3);
        assert_eq!(state.log.last().unwrap().event, "motion_seconded");
    }

    #[test]
    fn test_failed_operation_leaves_state_untouched() {
        let state = debating();
        let before = state.clone();
        let err = state
            .propose_motion(&member("carol"), main_motion("buy a projector"), 40)
            .unwrap_err();
        assert!(matches!(err, ProcedureError::NotInOrder { kind: MotionKind::Main, .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_vote_cycle_adopts_main_motion() {
        let state = debating().open_vote(&chair(), 1_000).unwrap();
        let state = state
            .cast_vote(&member("alice"), VoteChoice::Aye, 2_000)
            .unwrap()
            .cast_vote(&member("bob"), VoteChoice::Aye, 2_000)
            .unwrap();
        assert_eq!(
            state.cast_vote(&member("bob"), VoteChoice::Nay, 2_500).unwrap_err(),
            ProcedureError::AlreadyVoted("bob".to_string())
        );
        assert_eq!(
            state.close_vote(&chair(), None, 10_000).unwrap_err(),
            ProcedureError::VoteStillOpen { remaining_ms: 21_000 }
        );

        let state = state
            .cast_vote(&member("carol"), VoteChoice::Nay, 3_000)
            .unwrap()
            .cast_vote(&chair(), VoteChoice::Abstain, 3_000)
            .unwrap();
        // everyone present has voted, so the chair may close early
        let state = state.close_vote(&chair(), None, 4_000).unwrap();
        assert!(state.stack.is_empty());
        assert_eq!(state.phase, MeetingPhase::NewBusiness);
        assert_eq!(state.decided.len(), 1);
        assert_eq!(state.decided[0].result, MotionStatus::Adopted);
        assert_eq!(state.adopted().count(), 1);
    }

    #[test]
    fn test_silent_members_abstain_after_window() {
        let state = debating()
            .open_vote(&chair(), 0)
            .unwrap()
            .cast_vote(&member("alice"), VoteChoice::Aye, 1_000)
            .unwrap();

        let closed_early = state.close_vote(&chair(), None, 45_000).unwrap();
        assert_eq!(closed_early.decided[0].motion.votes.abstain, 0);

        let closed_late = state.close_vote(&chair(), None, 61_000).unwrap();
        let votes = closed_late.decided[0].motion.votes;
        assert_eq!(votes.aye, 1);
        assert_eq!(votes.abstain, 3);
        assert_eq!(closed_late.decided[0].result, MotionStatus::Adopted);
    }

    #[test]
    fn test_absent_member_cannot_vote() {
        let state = debating().open_vote(&chair(), 0).unwrap();
        assert_eq!(
            state.cast_vote(&member("dave"), VoteChoice::Aye, 10).unwrap_err(),
            ProcedureError::NotPresent("dave".to_string())
        );
    }

    #[test]
    fn test_members_present_context() {
        let state = debating()
            .open_vote(&chair(), 0)
            .unwrap()
            .cast_vote(&member("alice"), VoteChoice::Aye, 1)
            .unwrap()
            .cast_vote(&member("bob"), VoteChoice::Aye, 1)
            .unwrap()
            .cast_vote(&member("carol"), VoteChoice::Nay, 1)
            .unwrap();
        let context = VotingContext::new(crate::quorum::VotingBasis::MembersPresent, 6, 10);
        let closed = state.close_vote(&chair(), Some(context), 40_000).unwrap();
        assert_eq!(closed.decided[0].result, MotionStatus::Defeated);
    }

    #[test]
    fn test_motion_queued_while_floor_held() {
        let state = debating()
            .request_floor(&member("bob"), Stance::Con, 40)
            .unwrap()
            .recognize_speaker(&chair(), 50)
            .unwrap();
        assert_eq!(state.debate.floor_holder(), Some("bob"));

        let state = state
            .propose_motion(
                &member("carol"),
                MotionProposal::new(MotionKind::Commit, "refer to finance", "carol"),
                60,
            )
            .unwrap();
        assert_eq!(state.stack.len(), 1);
        assert_eq!(state.queued.len(), 1);
        assert_eq!(
            state.recognize_queued(&chair(), 0, 70).unwrap_err(),
            ProcedureError::FloorHeld("bob".to_string())
        );

        let state = state
            .yield_floor(&member("bob"), 80)
            .unwrap()
            .recognize_queued(&chair(), 0, 90)
            .unwrap();
        assert!(state.queued.is_empty());
        let top = state.stack.top().unwrap();
        assert_eq!(top.kind, MotionKind::Commit);
        assert_eq!(top.mover, "carol");
        assert!(state.checkpoints.contains_key(&top.id));
    }

    #[test]
    fn test_only_highest_queued_may_be_recognized() {
        let state = debating()
            .request_floor(&member("bob"), Stance::Con, 40)
            .unwrap()
            .recognize_speaker(&chair(), 50)
            .unwrap()
            .propose_motion(
                &member("carol"),
                MotionProposal::new(MotionKind::Commit, "refer to finance", "carol"),
                60,
            )
            .unwrap()
            .propose_motion(
                &member("alice"),
                MotionProposal::new(MotionKind::LayOnTable, "table it", "alice"),
                65,
            )
            .unwrap()
            .yield_floor(&member("bob"), 70)
            .unwrap();

        assert_eq!(
            state.recognize_queued(&chair(), 1, 80).unwrap_err(),
            ProcedureError::NotHighestPrecedence { index: 1 }
        );
        let dismissed = state.dismiss_queued(&chair(), 0, "dilatory", 80).unwrap();
        assert_eq!(dismissed.dismissed[0].reason, "dilatory");
        assert_eq!(
            dismissed.queued.iter().next().unwrap().proposal.kind,
            MotionKind::Commit
        );
    }

    #[test]
    fn test_interrupting_motion_goes_straight_to_stack() {
        let state = debating()
            .request_floor(&member("bob"), Stance::Con, 40)
            .unwrap()
            .recognize_speaker(&chair(), 50)
            .unwrap()
            .propose_motion(
                &member("carol"),
                MotionProposal::new(MotionKind::PointOfOrder, "speaker is off topic", "carol"),
                60,
            )
            .unwrap();
        assert!(state.queued.is_empty());
        assert_eq!(state.stack.top().unwrap().kind, MotionKind::PointOfOrder);
        // bob's floor is saved with the main motion's debate
        assert_eq!(state.debate.floor_holder(), None);

        let state = state.rule(&chair(), "Point not well taken", 70).unwrap();
        assert_eq!(state.debate.floor_holder(), Some("bob"));
        assert!(state.chair_ruling.is_some());
        assert!(
            state
                .availability()
                .iter()
                .any(|a| a.kind == MotionKind::Appeal && a.enabled)
        );
    }

    #[test]
    fn test_speaking_order_and_limits() {
        let state = debating()
            .request_floor(&member("bob"), Stance::Pro, 40)
            .unwrap()
            .request_floor(&member("carol"), Stance::Con, 41)
            .unwrap()
            .request_floor(&member("alice"), Stance::Pro, 42)
            .unwrap();
        let order: Vec<_> = state.debate.queue.iter().map(|e| e.participant.as_str()).collect();
        assert_eq!(order, vec!["alice", "bob", "carol"]);
        assert_eq!(
            state.request_floor(&member("bob"), Stance::Pro, 43).unwrap_err(),
            ProcedureError::AlreadyQueued("bob".to_string())
        );

        let limited = MeetingState {
            settings: ProcedureSettings::default().with_debate(DebateLimits {
                max_speeches_per_member: Some(1),
                ..Default::default()
            }),
            ..state
        };
        let spoke = limited
            .recognize_speaker(&chair(), 50)
            .unwrap()
            .yield_floor(&member("alice"), 60)
            .unwrap();
        assert_eq!(
            spoke.request_floor(&member("alice"), Stance::Pro, 70).unwrap_err(),
            ProcedureError::SpeechLimitReached {
                member: "alice".to_string(),
                limit: 1
            }
        );
    }

    #[test]
    fn test_no_debate_before_second() {
        let state = in_session()
            .propose_motion(&member("alice"), main_motion("allocate $500"), 10)
            .unwrap();
        assert_eq!(
            state.request_floor(&member("bob"), Stance::Pro, 20).unwrap_err(),
            ProcedureError::DebateClosed
        );
    }

    #[test]
    fn test_decline_records_ruling() {
        let state = in_session()
            .propose_motion(&member("alice"), main_motion("abolish the board"), 10)
            .unwrap()
            .decline_motion(&chair(), "conflicts with the bylaws", 20)
            .unwrap();
        assert!(state.stack.is_empty());
        assert_eq!(state.phase, MeetingPhase::NewBusiness);
        assert_eq!(
            state.decided[0].description,
            "Ruled out of order: conflicts with the bylaws"
        );
        assert_eq!(
            state.chair_ruling.as_ref().unwrap().ruling,
            "conflicts with the bylaws"
        );
    }

    #[test]
    fn test_inquiry_request_flow() {
        let state = debating()
            .raise_request(
                &member("carol"),
                RequestType::ParliamentaryInquiry,
                "Is an amendment in order?",
                40,
            )
            .unwrap();
        let id = state.requests[0].id.clone();
        assert_eq!(id.as_str(), "r-2");

        let state = state
            .accept_request(&chair(), &id, 50)
            .unwrap()
            .respond_request(&chair(), &id, "It is", 60)
            .unwrap();
        let request = state.request(&id).unwrap();
        assert_eq!(request.status, RequestStatus::Responded);
        assert_eq!(request.response.as_deref(), Some("It is"));
        assert_eq!(state.stack.len(), 1);
    }

    #[test]
    fn test_withdraw_request_by_mover() {
        let state = debating();
        assert_eq!(
            state
                .raise_request(&member("bob"), RequestType::WithdrawMotion, "", 40)
                .unwrap_err(),
            ProcedureError::NotMover
        );
        let state = state
            .raise_request(&member("alice"), RequestType::WithdrawMotion, "", 40)
            .unwrap();
        let id = state.requests[0].id.clone();
        let state = state.accept_request(&chair(), &id, 50).unwrap();
        assert!(state.stack.is_empty());
        assert_eq!(state.decided[0].result, MotionStatus::Withdrawn);
        assert_eq!(state.phase, MeetingPhase::NewBusiness);
    }

    #[test]
    fn test_point_of_order_escalation() {
        let state = debating()
            .raise_request(&member("carol"), RequestType::PointOfOrder, "No quorum", 40)
            .unwrap();
        let id = state.requests[0].id.clone();
        assert!(matches!(
            state
                .raise_request(&member("bob"), RequestType::PointOfOrder, "Again", 41)
                .unwrap_err(),
            ProcedureError::NotInOrder { .. }
        ));

        let state = state.escalate_request(&chair(), &id, 50).unwrap();
        let top = state.stack.top().unwrap();
        assert_eq!(top.kind, MotionKind::PointOfOrder);
        assert_eq!(top.mover, "carol");
        assert_eq!(state.request(&id).unwrap().status, RequestStatus::Responded);

        let inquiry = state
            .raise_request(&member("bob"), RequestType::RequestForInfo, "Cost?", 60)
            .unwrap();
        let info_id = inquiry.requests[1].id.clone();
        assert_eq!(
            inquiry.escalate_request(&chair(), &info_id, 70).unwrap_err(),
            ProcedureError::NotEscalatable(RequestType::RequestForInfo)
        );
    }

    #[test]
    fn test_recess_and_resume() {
        let state = debating()
            .propose_motion(
                &member("carol"),
                MotionProposal::new(MotionKind::Recess, "recess", "carol")
                    .with_metadata(MotionMetadata::default().with_recess_minutes(5)),
                40,
            )
            .unwrap()
            .accept_motion(&chair(), 50)
            .unwrap()
            .second_motion(&member("bob"), 60)
            .unwrap();
        // recess is not debatable, so seconding opens the vote
        assert_eq!(state.stack.top().unwrap().status, MotionStatus::Voting);

        let mut state = state;
        for name in ["chair", "alice", "bob", "carol"] {
            state = state.cast_vote(&member(name), VoteChoice::Aye, 70).unwrap();
        }
        let state = state.close_vote(&chair(), None, 100).unwrap();
        assert_eq!(state.phase, MeetingPhase::Recess { ends_at: 300_100 });
        assert_eq!(state.stack.len(), 1);

        assert_eq!(
            state.end_recess(&member("bob"), 200_100).unwrap_err(),
            ProcedureError::RecessNotOver {
                remaining_ms: 100_000
            }
        );
        let resumed = state.end_recess(&member("bob"), 300_100).unwrap();
        assert_eq!(resumed.phase, MeetingPhase::Deliberation);
        let early = state.end_recess(&chair(), 1_000).unwrap();
        assert_eq!(early.phase, MeetingPhase::Deliberation);
    }

    #[test]
    fn test_suspend_and_restore_rules() {
        let mut state = debating()
            .propose_motion(
                &member("carol"),
                MotionProposal::new(MotionKind::SuspendRules, "suspend the rules", "carol"),
                40,
            )
            .unwrap()
            .accept_motion(&chair(), 50)
            .unwrap()
            .second_motion(&member("bob"), 60)
            .unwrap();
        for name in ["chair", "alice", "bob", "carol"] {
            state = state.cast_vote(&member(name), VoteChoice::Aye, 70).unwrap();
        }
        let suspended = state.close_vote(&chair(), None, 100).unwrap();
        assert_eq!(suspended.phase, MeetingPhase::RulesSuspended);
        assert!(suspended.stack.is_empty());

        let restored = suspended.restore_rules(&chair(), 200).unwrap();
        assert_eq!(restored.phase, MeetingPhase::Deliberation);
        assert_eq!(restored.stack.top().unwrap().text, "allocate $500");
        assert!(restored.suspension.is_none());
    }

    #[test]
    fn test_scheduled_adjournment() {
        let mut state = in_session();
        assert!(state.scheduled_adjournment(1_000).is_none());
        state.adjourn_at = Some(5_000);
        assert!(state.scheduled_adjournment(4_999).is_none());
        let adjourned = state.scheduled_adjournment(5_000).unwrap();
        assert_eq!(adjourned.phase, MeetingPhase::Adjourned);
        assert_eq!(adjourned.version, state.version + 1);
    }

    #[test]
    fn test_nothing_after_adjournment() {
        let mut state = in_session();
        state.phase = MeetingPhase::Adjourned;
        assert!(matches!(
            state
                .propose_motion(&member("alice"), main_motion("one more thing"), 10)
                .unwrap_err(),
            ProcedureError::NotInOrder { .. }
        ));
        assert!(state.mark_present(&chair(), "dave", 10).is_err());
    }

    fn phase_error(operation: &'static str, phase: &str) -> ProcedureError {
        ProcedureError::InvalidPhase {
            operation,
            phase: phase.to_string(),
        }
    }

    /// Adopt a privileged motion by carol over the pending main motion
    fn adopt_over_main(proposal: MotionProposal) -> MeetingState {
        let mut state = debating()
            .propose_motion(&member("carol"), proposal, 40)
            .unwrap()
            .accept_motion(&chair(), 50)
            .unwrap()
            .second_motion(&member("bob"), 60)
            .unwrap();
        for name in ["chair", "alice", "bob", "carol"] {
            state = state.cast_vote(&member(name), VoteChoice::Aye, 70).unwrap();
        }
        state.close_vote(&chair(), None, 100).unwrap()
    }

    #[test]
    fn test_adjournment_leaves_pending_question_undecided() {
        let adjourned = adopt_over_main(MotionProposal::new(MotionKind::Adjourn, "adjourn", "carol"));
        assert_eq!(adjourned.phase, MeetingPhase::Adjourned);
        assert_eq!(adjourned.stack.top().unwrap().status, MotionStatus::Debating);

        assert_eq!(
            adjourned.open_vote(&chair(), 200).unwrap_err(),
            phase_error("put the question to a vote", "adjourned")
        );
        assert_eq!(
            adjourned.request_floor(&member("bob"), Stance::Pro, 200).unwrap_err(),
            phase_error("request the floor", "adjourned")
        );
        assert_eq!(
            adjourned.rule(&chair(), "adopted", 200).unwrap_err(),
            phase_error("rule on the question", "adjourned")
        );
        assert_eq!(
            adjourned.mark_absent(&chair(), "bob", 200).unwrap_err(),
            phase_error("record attendance", "adjourned")
        );

        // a vote left open on the main motion cannot be finished either
        let mut voting = adjourned.clone();
        voting.stack.top_mut().unwrap().start_voting(100);
        assert_eq!(
            voting.cast_vote(&member("alice"), VoteChoice::Aye, 200).unwrap_err(),
            phase_error("vote", "adjourned")
        );
        assert_eq!(
            voting.close_vote(&chair(), None, 200_000).unwrap_err(),
            phase_error("close the vote", "adjourned")
        );

        let mut stated = adjourned.clone();
        stated.stack.top_mut().unwrap().status = MotionStatus::PendingChair;
        assert_eq!(
            stated.accept_motion(&chair(), 200).unwrap_err(),
            phase_error("state the question", "adjourned")
        );
        assert!(adjourned.decided.iter().all(|d| !d.motion.is_main()));
        assert_eq!(adjourned.adopted().count(), 0);
    }

    #[test]
    fn test_recess_holds_business_but_allows_inquiry() {
        let recessed = adopt_over_main(
            MotionProposal::new(MotionKind::Recess, "recess", "carol")
                .with_metadata(MotionMetadata::default().with_recess_minutes(5)),
        );
        assert_eq!(recessed.phase, MeetingPhase::Recess { ends_at: 300_100 });

        assert_eq!(
            recessed.request_floor(&member("bob"), Stance::Con, 200).unwrap_err(),
            phase_error("request the floor", "recess")
        );
        assert_eq!(
            recessed.recognize_speaker(&chair(), 200).unwrap_err(),
            phase_error("recognize a speaker", "recess")
        );
        assert_eq!(
            recessed.open_vote(&chair(), 200).unwrap_err(),
            phase_error("put the question to a vote", "recess")
        );
        assert!(matches!(
            recessed
                .propose_motion(&member("bob"), main_motion("buy a projector"), 200)
                .unwrap_err(),
            ProcedureError::NotInOrder { kind: MotionKind::Main, .. }
        ));

        let answered = recessed
            .propose_motion(
                &member("carol"),
                MotionProposal::new(MotionKind::ParliamentaryInquiry, "when do we resume?", "carol"),
                200,
            )
            .unwrap()
            .rule(&chair(), "In five minutes", 300)
            .unwrap();
        assert_eq!(answered.phase, MeetingPhase::Recess { ends_at: 300_100 });
        assert_eq!(answered.stack.len(), 1);

        let resumed = answered
            .end_recess(&chair(), 400)
            .unwrap()
            .open_vote(&chair(), 500)
            .unwrap();
        assert_eq!(resumed.stack.top().unwrap().status, MotionStatus::Voting);
    }

    #[test]
    fn test_suspended_rules_hold_business() {
        let suspended = adopt_over_main(MotionProposal::new(
            MotionKind::SuspendRules,
            "suspend the rules",
            "carol",
        ));
        assert_eq!(suspended.phase, MeetingPhase::RulesSuspended);

        let mut stranded = suspended.clone();
        stranded.stack = suspended.suspension.as_ref().unwrap().stack.clone();
        assert_eq!(
            stranded.open_vote(&chair(), 200).unwrap_err(),
            phase_error("put the question to a vote", "rules-suspended")
        );
        assert_eq!(
            suspended.accept_motion(&chair(), 200).unwrap_err(),
            phase_error("state the question", "rules-suspended")
        );
        assert_eq!(
            suspended.second_motion(&member("bob"), 200).unwrap_err(),
            phase_error("second a motion", "rules-suspended")
        );
        assert_eq!(
            suspended.cast_vote(&member("bob"), VoteChoice::Aye, 200).unwrap_err(),
            phase_error("vote", "rules-suspended")
        );

        let answered = suspended
            .propose_motion(
                &member("bob"),
                MotionProposal::new(MotionKind::ParliamentaryInquiry, "may the guest speak?", "bob"),
                200,
            )
            .unwrap()
            .rule(&chair(), "The guest may speak", 300)
            .unwrap();
        assert!(answered.stack.is_empty());
        assert_eq!(answered.phase, MeetingPhase::RulesSuspended);
    }

    #[test]
    fn test_total_debate_time_closes_the_floor() {
        let mut state = debating();
        state.settings = ProcedureSettings::default().with_debate(DebateLimits {
            total_time_limit_secs: Some(60),
            ..Default::default()
        });
        let state = state
            .request_floor(&member("bob"), Stance::Con, 40)
            .unwrap()
            .request_floor(&member("carol"), Stance::Pro, 41)
            .unwrap()
            .recognize_speaker(&chair(), 50)
            .unwrap();
        let first = state.debate.floor_holder().unwrap().to_string();

        // the running speech counts toward the limit
        assert_eq!(
            state.request_floor(&member("alice"), Stance::Pro, 60_050).unwrap_err(),
            ProcedureError::DebateTimeExpired { limit_secs: 60 }
        );
        assert!(
            state
                .request_floor(&member("alice"), Stance::Pro, 30_000)
                .is_ok()
        );

        let state = state.yield_floor(&member(&first), 60_050).unwrap();
        assert_eq!(
            state.recognize_speaker(&chair(), 70_000).unwrap_err(),
            ProcedureError::DebateTimeExpired { limit_secs: 60 }
        );
        // the question can still be put
        assert!(state.open_vote(&chair(), 70_000).is_ok());
    }

    #[test]
    fn test_expired_speaker_is_replaced() {
        let mut state = debating();
        state.settings = ProcedureSettings::default().with_debate(DebateLimits {
            max_speech_duration_secs: Some(10),
            ..Default::default()
        });
        let state = state
            .request_floor(&member("bob"), Stance::Con, 40)
            .unwrap()
            .request_floor(&member("carol"), Stance::Pro, 41)
            .unwrap()
            .recognize_speaker(&chair(), 50)
            .unwrap();
        let first = state.debate.floor_holder().unwrap().to_string();
        assert_eq!(
            state.recognize_speaker(&chair(), 5_000).unwrap_err(),
            ProcedureError::FloorHeld(first.clone())
        );

        let next = state.recognize_speaker(&chair(), 20_000).unwrap();
        let second = next.debate.floor_holder().unwrap();
        assert_ne!(second, first);
        let ended = next
            .debate
            .history
            .iter()
            .find(|s| s.participant == first)
            .unwrap();
        assert_eq!(ended.ended_at, Some(20_000));
        assert!(next.log.last().unwrap().message.contains("time expired"));
    }

    #[test]
    fn test_withdraw_request_targets_motion_it_was_raised_on() {
        let state = debating()
            .raise_request(&member("alice"), RequestType::WithdrawMotion, "", 40)
            .unwrap();
        let id = state.requests[0].id.clone();
        assert_eq!(state.requests[0].target, Some(MotionId::from_sequence(1)));

        let covered = state
            .propose_motion(
                &member("alice"),
                MotionProposal::new(MotionKind::Commit, "refer to finance", "alice"),
                50,
            )
            .unwrap();
        assert_eq!(
            covered.accept_request(&chair(), &id, 60).unwrap_err(),
            ProcedureError::NoLongerPending(MotionId::from_sequence(1))
        );
        assert_eq!(covered.stack.len(), 2);
    }
}
