//! The motion stack: pending questions in the order they were made.
//!
//! Index 0 is the motion that was made on an empty floor; the last entry is
//! the pending question. Pushes are validated before anything is copied, so
//! a refused push leaves the caller's stack untouched.

use super::entities::Motion;
use super::kind::{MotionCategory, MotionKind};
use crate::core::error::ProcedureError;
use crate::core::ids::MotionId;
use serde::{Deserialize, Serialize};

/// Ordered pushdown structure of pending motions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MotionStack {
    entries: Vec<Motion>,
}

impl MotionStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `entry` against the stack and return the stack with it on top
    pub fn push(&self, entry: Motion) -> Result<MotionStack, ProcedureError> {
        self.validate_push(&entry)?;
        let mut next = self.clone();
        next.entries.push(entry);
        Ok(next)
    }

    /// Remove the pending question
    pub fn pop(&self) -> (MotionStack, Option<Motion>) {
        let mut next = self.clone();
        let popped = next.entries.pop();
        (next, popped)
    }

    pub fn validate_push(&self, entry: &Motion) -> Result<(), ProcedureError> {
        match entry.category {
            MotionCategory::Main if !self.is_empty() => Err(ProcedureError::MainMotionPending),
            MotionCategory::BringBack if !self.is_empty() => {
                Err(ProcedureError::QuestionPending(entry.kind))
            }
            MotionCategory::Subsidiary if entry.kind == MotionKind::Amend => {
                self.validate_amendment(entry)
            }
            MotionCategory::Subsidiary => self.validate_precedence(entry),
            // Privileged and incidental motions are gated by phase, not rank
            _ => Ok(()),
        }
    }

    fn validate_amendment(&self, entry: &Motion) -> Result<(), ProcedureError> {
        if self.is_empty() {
            return Err(ProcedureError::NothingToAmend);
        }
        let max = entry.kind.rules().max_degree;
        if entry.degree == 0 || entry.degree > max {
            return Err(ProcedureError::AmendmentDegreeExceeded {
                degree: entry.degree,
                max,
            });
        }
        if self.pending_amendment(entry.degree).is_some() {
            return Err(ProcedureError::AmendmentAlreadyPending(entry.degree));
        }
        Ok(())
    }

    fn validate_precedence(&self, entry: &Motion) -> Result<(), ProcedureError> {
        match self.top() {
            Some(top)
                if top.category == MotionCategory::Subsidiary
                    && top.precedence >= entry.precedence =>
            {
                Err(ProcedureError::PrecedenceViolation {
                    kind: entry.kind,
                    pending: top.kind,
                })
            }
            _ => Ok(()),
        }
    }

    /// The pending question
    pub fn top(&self) -> Option<&Motion> {
        self.entries.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Motion> {
        self.entries.last_mut()
    }

    /// The motion made on an empty floor
    pub fn bottom(&self) -> Option<&Motion> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Motion> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn find(&self, id: &MotionId) -> Option<&Motion> {
        self.entries.iter().find(|m| &m.id == id)
    }

    pub fn find_mut(&mut self, id: &MotionId) -> Option<&mut Motion> {
        self.entries.iter_mut().find(|m| &m.id == id)
    }

    pub fn contains_kind(&self, kind: MotionKind) -> bool {
        self.entries
            .iter()
            .any(|m| m.kind == kind && !m.status.is_resolved())
    }

    /// Unresolved amendment of the given degree, if one is pending
    pub fn pending_amendment(&self, degree: u8) -> Option<&Motion> {
        self.entries
            .iter()
            .find(|m| m.is_amendment() && m.degree == degree && !m.status.is_resolved())
    }

    /// Highest amendment degree currently pending (0 if none)
    pub fn current_degree(&self) -> u8 {
        self.entries
            .iter()
            .filter(|m| m.is_amendment() && !m.status.is_resolved())
            .map(|m| m.degree)
            .max()
            .unwrap_or(0)
    }

    /// Split off everything from `index` upward, returning the removed motions bottom-first
    pub fn truncate_from(&self, index: usize) -> (MotionStack, Vec<Motion>) {
        let mut next = self.clone();
        let removed = if index < next.entries.len() {
            next.entries.split_off(index)
        } else {
            Vec::new()
        };
        (next, removed)
    }

    pub fn from_motions(entries: Vec<Motion>) -> Self {
        Self { entries }
    }

    pub fn into_motions(self) -> Vec<Motion> {
        self.entries
    }
}
