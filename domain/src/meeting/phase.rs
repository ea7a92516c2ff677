//! Meeting phases

use serde::{Deserialize, Serialize};

/// Where the meeting is in its lifecycle
///
/// ```text
/// not-started ──call to order──▶ new-business ◀──▶ deliberation
///                                     │   ▲
///                      recess / suspend   end recess / restore rules
///                                     ▼   │
///                          recess, rules-suspended
///
/// any business phase ──adjourn──▶ adjourned
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "phase", rename_all = "kebab-case")]
pub enum MeetingPhase {
    #[default]
    NotStarted,
    /// Floor is open for a main motion
    NewBusiness,
    /// A question is pending
    Deliberation,
    Recess {
        ends_at: u64,
    },
    RulesSuspended,
    Adjourned,
}

impl MeetingPhase {
    pub fn as_str(&self) -> &str {
        match self {
            MeetingPhase::NotStarted => "not-started",
            MeetingPhase::NewBusiness => "new-business",
            MeetingPhase::Deliberation => "deliberation",
            MeetingPhase::Recess { .. } => "recess",
            MeetingPhase::RulesSuspended => "rules-suspended",
            MeetingPhase::Adjourned => "adjourned",
        }
    }

    /// New business or deliberation
    pub fn is_business(&self) -> bool {
        matches!(self, MeetingPhase::NewBusiness | MeetingPhase::Deliberation)
    }

    /// Called to order and not yet adjourned
    pub fn is_in_session(&self) -> bool {
        !matches!(self, MeetingPhase::NotStarted | MeetingPhase::Adjourned)
    }
}

impl std::fmt::Display for MeetingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
