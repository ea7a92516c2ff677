//! The complete meeting state threaded through every engine call.
//!
//! Operations take `&MeetingState` and return a new value; the caller
//! commits it. Every collection is serialized even when empty, so the
//! state survives transports that would otherwise drop empty arrays.

use super::phase::MeetingPhase;
use super::queued::{DismissedProposal, QueuedMotions};
use crate::availability::{AvailabilityContext, MotionAvailability, available};
use crate::core::ids::{MotionId, RequestId};
use crate::debate::DebateContext;
use crate::motion::{Motion, MotionStack, MotionStatus};
use crate::request::{PendingRequest, RequestType};
use crate::settings::ProcedureSettings;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A motion that left the floor by vote, ruling or withdrawal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecidedMotion {
    pub motion: Motion,
    /// Adopted, defeated or withdrawn
    pub result: MotionStatus,
    pub description: String,
    pub decided_at: u64,
}

/// A sub-stack set aside by Lay on the Table, Postpone Definitely or Commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabledUnit {
    /// Bottom-first, exactly as it sat on the stack
    pub motions: Vec<Motion>,
    /// Tabled, postponed or committed
    pub status: MotionStatus,
    pub archived_by: MotionId,
    pub postpone_until: Option<String>,
    pub committee: Option<String>,
    pub archived_at: u64,
    /// Debate on the top question of the unit when it was set aside
    #[serde(default)]
    pub debate: DebateContext,
    /// Debate saved under each motion above the bottom one
    #[serde(default)]
    pub checkpoints: BTreeMap<MotionId, DebateContext>,
}

impl TabledUnit {
    pub fn contains(&self, id: &MotionId) -> bool {
        self.motions.iter().any(|m| &m.id == id)
    }
}

/// Outstanding ruling that an Appeal may be taken from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChairRuling {
    pub ruling: String,
    pub motion_id: Option<MotionId>,
    pub issued_at: u64,
}

/// Live business set aside while the rules are suspended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspensionSnapshot {
    pub stack: MotionStack,
    pub debate: DebateContext,
    pub checkpoints: BTreeMap<MotionId, DebateContext>,
    pub purpose: Option<String>,
    pub suspended_at: u64,
}

/// One line in the append-only proceedings log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: u64,
    pub actor: String,
    pub event: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingState {
    pub meeting_id: String,
    /// Bumped by every successful operation
    pub version: u64,
    /// Source of motion and request ids
    pub sequence: u64,
    pub phase: MeetingPhase,
    pub settings: ProcedureSettings,
    /// Everyone who has ever been marked present
    pub roster: BTreeSet<String>,
    pub present: BTreeSet<String>,
    pub stack: MotionStack,
    /// Debate on the pending question
    pub debate: DebateContext,
    /// Debate context saved when the keyed motion was pushed
    pub checkpoints: BTreeMap<MotionId, DebateContext>,
    pub queued: QueuedMotions,
    pub dismissed: Vec<DismissedProposal>,
    pub requests: Vec<PendingRequest>,
    pub decided: Vec<DecidedMotion>,
    pub tabled: Vec<TabledUnit>,
    pub rescinded: BTreeSet<MotionId>,
    pub chair_ruling: Option<ChairRuling>,
    pub suspension: Option<SuspensionSnapshot>,
    pub adjourn_at: Option<u64>,
    pub log: Vec<LogEntry>,
}

impl MeetingState {
    pub fn new(meeting_id: impl Into<String>, settings: ProcedureSettings) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            version: 0,
            sequence: 0,
            phase: MeetingPhase::NotStarted,
            settings,
            roster: BTreeSet::new(),
            present: BTreeSet::new(),
            stack: MotionStack::new(),
            debate: DebateContext::default(),
            checkpoints: BTreeMap::new(),
            queued: QueuedMotions::new(),
            dismissed: Vec::new(),
            requests: Vec::new(),
            decided: Vec::new(),
            tabled: Vec::new(),
            rescinded: BTreeSet::new(),
            chair_ruling: None,
            suspension: None,
            adjourn_at: None,
            log: Vec::new(),
        }
    }

    pub fn pending_question(&self) -> Option<&Motion> {
        self.stack.top()
    }

    pub fn is_present(&self, member: &str) -> bool {
        self.present.contains(member)
    }

    pub fn present_count(&self) -> u32 {
        self.present.len() as u32
    }

    /// Membership size used for quorum and the entire-membership basis
    pub fn participant_count(&self) -> u32 {
        self.settings
            .total_membership
            .unwrap_or(self.roster.len() as u32)
    }

    pub fn request(&self, id: &RequestId) -> Option<&PendingRequest> {
        self.requests.iter().find(|r| &r.id == id)
    }

    /// Whether `decided[index]` no longer stands: the motion was decided
    /// again later, or it is back before the assembly.
    pub fn is_superseded(&self, index: usize) -> bool {
        let Some(entry) = self.decided.get(index) else {
            return false;
        };
        let id = &entry.motion.id;
        self.decided[index + 1..].iter().any(|d| &d.motion.id == id)
            || self.stack.find(id).is_some()
            || self
                .suspension
                .as_ref()
                .is_some_and(|s| s.stack.find(id).is_some())
    }

    /// The decision that currently stands for each decided motion
    pub fn standing_decisions(&self) -> impl Iterator<Item = &DecidedMotion> {
        self.decided
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.is_superseded(*i))
            .map(|(_, d)| d)
    }

    /// Decided main motions that may be brought back by Reconsider
    pub fn reconsiderable(&self) -> impl Iterator<Item = &DecidedMotion> {
        self.standing_decisions().filter(|d| {
            d.motion.is_main()
                && matches!(d.result, MotionStatus::Adopted | MotionStatus::Defeated)
        })
    }

    /// Adopted main motions that have not been rescinded
    pub fn adopted(&self) -> impl Iterator<Item = &DecidedMotion> {
        self.standing_decisions().filter(|d| {
            d.motion.is_main()
                && d.result == MotionStatus::Adopted
                && !self.rescinded.contains(&d.motion.id)
        })
    }

    pub fn availability_context(&self) -> AvailabilityContext {
        AvailabilityContext {
            chair_ruling_pending: self.chair_ruling.is_some(),
            point_of_order_raised: self
                .requests
                .iter()
                .any(|r| r.request_type == RequestType::PointOfOrder && r.is_open()),
            tabled_count: self.tabled.len(),
            reconsiderable_count: self.reconsiderable().count(),
            rescindable_count: self.adopted().count(),
        }
    }

    /// Every motion type with whether it may be made now
    pub fn availability(&self) -> Vec<MotionAvailability> {
        available(&self.stack, self.phase, &self.availability_context())
    }

    pub(crate) fn next_motion_id(&mut self) -> MotionId {
        self.sequence += 1;
        MotionId::from_sequence(self.sequence)
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        self.sequence += 1;
        RequestId::from_sequence(self.sequence)
    }

    /// Finish an operation: bump the version and append to the log
    pub(crate) fn commit(
        &mut self,
        actor: &str,
        event: &str,
        message: impl Into<String>,
        now: u64,
    ) {
        self.version += 1;
        self.log.push(LogEntry {
            at: now,
            actor: actor.to_string(),
            event: event.to_string(),
            message: message.into(),
        });
    }
}
