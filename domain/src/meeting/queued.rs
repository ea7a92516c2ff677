//! Motions proposed while another member held the floor.
//!
//! The collection is kept sorted by descending precedence, then by enqueue
//! time, so the head is always the only proposal the chair may act on.
//! Deserialized input is re-sorted, which keeps the ordering intact even
//! when the state was edited by hand.

use crate::core::error::ProcedureError;
use crate::motion::MotionProposal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedProposal {
    pub proposal: MotionProposal,
    pub enqueued_at: u64,
}

impl QueuedProposal {
    /// Rank used for ordering; types without precedence rank lowest
    pub fn precedence(&self) -> u8 {
        self.proposal.kind.precedence().unwrap_or(0)
    }
}

/// A proposal dropped without reaching the stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DismissedProposal {
    pub proposal: MotionProposal,
    pub enqueued_at: u64,
    pub dismissed_at: u64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<QueuedProposal>", into = "Vec<QueuedProposal>")]
pub struct QueuedMotions {
    entries: Vec<QueuedProposal>,
}

impl From<Vec<QueuedProposal>> for QueuedMotions {
    fn from(mut entries: Vec<QueuedProposal>) -> Self {
        entries.sort_by(|a, b| {
            b.precedence()
                .cmp(&a.precedence())
                .then(a.enqueued_at.cmp(&b.enqueued_at))
        });
        Self { entries }
    }
}

impl From<QueuedMotions> for Vec<QueuedProposal> {
    fn from(queued: QueuedMotions) -> Self {
        queued.entries
    }
}

impl QueuedMotions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert behind every proposal of equal or higher precedence
    pub fn enqueue(&self, proposal: MotionProposal, now: u64) -> QueuedMotions {
        let entry = QueuedProposal {
            proposal,
            enqueued_at: now,
        };
        let rank = entry.precedence();
        let pos = self
            .entries
            .iter()
            .position(|e| e.precedence() < rank)
            .unwrap_or(self.entries.len());
        let mut next = self.clone();
        next.entries.insert(pos, entry);
        next
    }

    pub fn highest_precedence(&self) -> Option<u8> {
        self.entries.first().map(QueuedProposal::precedence)
    }

    /// The proposal at `index`, if the chair may act on it
    pub fn recognizable(&self, index: usize) -> Result<&QueuedProposal, ProcedureError> {
        let entry = self
            .entries
            .get(index)
            .ok_or(ProcedureError::QueuedMotionNotFound(index))?;
        if Some(entry.precedence()) != self.highest_precedence() {
            return Err(ProcedureError::NotHighestPrecedence { index });
        }
        Ok(entry)
    }

    /// Remove the proposal at `index` after checking it is recognizable
    pub fn take(&self, index: usize) -> Result<(QueuedMotions, QueuedProposal), ProcedureError> {
        self.recognizable(index)?;
        let mut next = self.clone();
        let entry = next.entries.remove(index);
        Ok((next, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedProposal> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<QueuedProposal> {
        self.entries
    }
}
