//! Debate limits and speaking permission.

use super::context::{CurrentSpeaker, DebateContext, Speech};
use crate::motion::{DebateLimits, MotionStack, MotionStatus};
use serde::{Deserialize, Serialize};

/// Speeches each member may make on one question when nothing else says otherwise
pub const DEFAULT_SPEECHES_PER_MEMBER: u32 = 2;

/// Limits in force on the pending question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateConstraints {
    pub max_speeches_per_member: u32,
    pub max_speech_duration_secs: Option<u32>,
    pub total_time_limit_secs: Option<u32>,
}

/// Organization defaults, overridden field by field by any limits an
/// adopted Limit Debate motion attached to the pending question.
pub fn constraints(stack: &MotionStack, org_defaults: &DebateLimits) -> DebateConstraints {
    let overrides = stack
        .top()
        .and_then(|m| m.metadata.debate_limits)
        .unwrap_or_default();

    DebateConstraints {
        max_speeches_per_member: overrides
            .max_speeches_per_member
            .or(org_defaults.max_speeches_per_member)
            .unwrap_or(DEFAULT_SPEECHES_PER_MEMBER),
        max_speech_duration_secs: overrides
            .max_speech_duration_secs
            .or(org_defaults.max_speech_duration_secs),
        total_time_limit_secs: overrides
            .total_time_limit_secs
            .or(org_defaults.total_time_limit_secs),
    }
}

/// Whether a member may be added to the speaking queue, and why not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakPermission {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl SpeakPermission {
    fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

pub fn can_speak(
    stack: &MotionStack,
    member: &str,
    history: &[Speech],
    org_defaults: &DebateLimits,
) -> SpeakPermission {
    let Some(top) = stack.top() else {
        return SpeakPermission::denied("No question is pending");
    };
    if !top.is_debatable {
        return SpeakPermission::denied(format!("{} is not debatable", top.kind));
    }
    if top.status != MotionStatus::Debating {
        return SpeakPermission::denied("Debate is not open on the pending question");
    }

    let limit = constraints(stack, org_defaults).max_speeches_per_member;
    let spoken = history.iter().filter(|s| s.participant == member).count() as u32;
    if spoken >= limit {
        return SpeakPermission::denied(format!(
            "{} has used all {} speeches on this question",
            member, limit
        ));
    }

    SpeakPermission::allowed()
}

/// Whether the current speech has run past the duration limit
pub fn speech_expired(speaker: &CurrentSpeaker, constraints: &DebateConstraints, now: u64) -> bool {
    constraints
        .max_speech_duration_secs
        .is_some_and(|secs| now.saturating_sub(speaker.started_at) >= u64::from(secs) * 1000)
}

/// Whether the total debate time on the pending question has been used up
pub fn debate_time_expired(debate: &DebateContext, constraints: &DebateConstraints, now: u64) -> bool {
    constraints
        .total_time_limit_secs
        .is_some_and(|secs| debate.elapsed_ms(now) >= u64::from(secs) * 1000)
}
