//! Export Minutes use case
//!
//! Builds the record of a meeting from its committed state: who attended,
//! what was decided, what was set aside and the full proceedings log.

use crate::ports::meeting_store::{MeetingStore, StoreError};
use gavel_domain::{LogEntry, MeetingState, MotionStatus};
use serde::Serialize;
use std::sync::Arc;

/// One decided question as it appears in the minutes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinutesDecision {
    pub id: String,
    pub motion: String,
    pub text: String,
    pub mover: String,
    pub result: MotionStatus,
    pub description: String,
    pub rescinded: bool,
    /// Replaced by a later decision on the same motion
    pub superseded: bool,
    pub decided_at: u64,
}

/// Business laid on the table, postponed or referred
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinutesDeferral {
    pub status: MotionStatus,
    pub motions: Vec<String>,
    pub committee: Option<String>,
    pub postpone_until: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Minutes {
    pub meeting_id: String,
    pub phase: String,
    pub present: Vec<String>,
    pub absent: Vec<String>,
    pub decisions: Vec<MinutesDecision>,
    pub deferred: Vec<MinutesDeferral>,
    /// Questions still on the floor, bottom first
    pub pending: Vec<String>,
    pub proceedings: Vec<LogEntry>,
}

impl Minutes {
    pub fn from_state(state: &MeetingState) -> Self {
        let decisions = state
            .decided
            .iter()
            .enumerate()
            .map(|(i, d)| MinutesDecision {
                id: d.motion.id.to_string(),
                motion: d.motion.kind.display_name().to_string(),
                text: d.motion.text.clone(),
                mover: d.motion.mover.clone(),
                result: d.result,
                description: d.description.clone(),
                rescinded: state.rescinded.contains(&d.motion.id),
                superseded: state.is_superseded(i),
                decided_at: d.decided_at,
            })
            .collect();

        let deferred = state
            .tabled
            .iter()
            .map(|unit| MinutesDeferral {
                status: unit.status,
                motions: unit
                    .motions
                    .iter()
                    .map(|m| format!("{}: {}", m.kind.display_name(), m.text))
                    .collect(),
                committee: unit.committee.clone(),
                postpone_until: unit.postpone_until.clone(),
            })
            .collect();

        Self {
            meeting_id: state.meeting_id.clone(),
            phase: state.phase.to_string(),
            present: state.present.iter().cloned().collect(),
            absent: state.roster.difference(&state.present).cloned().collect(),
            decisions,
            deferred,
            pending: state
                .stack
                .iter()
                .map(|m| format!("{}: {}", m.kind.display_name(), m.text))
                .collect(),
            proceedings: state.log.clone(),
        }
    }

    pub fn adopted(&self) -> impl Iterator<Item = &MinutesDecision> {
        self.decisions
            .iter()
            .filter(|d| d.result == MotionStatus::Adopted && !d.rescinded && !d.superseded)
    }
}

pub struct ExportMinutesUseCase {
    store: Arc<dyn MeetingStore>,
}

impl ExportMinutesUseCase {
    pub fn new(store: Arc<dyn MeetingStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, meeting_id: &str) -> Result<Minutes, StoreError> {
        let state = self.store.load(meeting_id).await?;
        Ok(Minutes::from_state(&state))
    }
}
