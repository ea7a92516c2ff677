//! Motion types and the closed enumerations derived from them.

use crate::core::error::ProcedureError;
use serde::{Deserialize, Serialize};

/// Category of a motion, which decides how it relates to the pending question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionCategory {
    /// Brings new business before the assembly
    Main,
    /// Applied to the pending question to modify or dispose of it
    Subsidiary,
    /// Urgent business unrelated to the pending question
    Privileged,
    /// Procedural questions arising out of other business
    Incidental,
    /// Reopens business already disposed of
    BringBack,
}

impl MotionCategory {
    pub fn as_str(&self) -> &str {
        match self {
            MotionCategory::Main => "main",
            MotionCategory::Subsidiary => "subsidiary",
            MotionCategory::Privileged => "privileged",
            MotionCategory::Incidental => "incidental",
            MotionCategory::BringBack => "bring-back",
        }
    }
}

impl std::fmt::Display for MotionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vote required to adopt a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VoteThreshold {
    /// More than half of the basis
    Majority,
    /// At least two thirds of the basis
    TwoThirds,
    /// Appeal: the chair's ruling stands unless ayes outnumber nays
    TieSustains,
    /// Decided by the chair, no vote taken
    #[serde(rename = "none")]
    ChairDecides,
}

impl VoteThreshold {
    pub fn as_str(&self) -> &str {
        match self {
            VoteThreshold::Majority => "majority",
            VoteThreshold::TwoThirds => "two-thirds",
            VoteThreshold::TieSustains => "tie-sustains",
            VoteThreshold::ChairDecides => "none",
        }
    }

    /// Whether the assembly votes on motions with this threshold
    pub fn is_voted(&self) -> bool {
        !matches!(self, VoteThreshold::ChairDecides)
    }
}

impl std::fmt::Display for VoteThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every motion type the engine understands
///
/// Subsidiary and privileged motions are listed in ascending precedence
/// order; the ordinal itself lives in the rules table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionKind {
    Main,

    // Subsidiary
    PostponeIndefinitely,
    Amend,
    Commit,
    PostponeDefinitely,
    LimitDebate,
    PreviousQuestion,
    LayOnTable,

    // Privileged
    OrdersOfTheDay,
    QuestionOfPrivilege,
    Recess,
    Adjourn,
    FixTimeToAdjourn,

    // Incidental
    PointOfOrder,
    Appeal,
    Division,
    SuspendRules,
    ParliamentaryInquiry,
    RequestForInformation,
    WithdrawMotion,
    ObjectionToConsideration,

    // Bring-back
    TakeFromTable,
    Reconsider,
    Rescind,
}

impl MotionKind {
    pub const ALL: [MotionKind; 24] = [
        MotionKind::Main,
        MotionKind::PostponeIndefinitely,
        MotionKind::Amend,
        MotionKind::Commit,
        MotionKind::PostponeDefinitely,
        MotionKind::LimitDebate,
        MotionKind::PreviousQuestion,
        MotionKind::LayOnTable,
        MotionKind::OrdersOfTheDay,
        MotionKind::QuestionOfPrivilege,
        MotionKind::Recess,
        MotionKind::Adjourn,
        MotionKind::FixTimeToAdjourn,
        MotionKind::PointOfOrder,
        MotionKind::Appeal,
        MotionKind::Division,
        MotionKind::SuspendRules,
        MotionKind::ParliamentaryInquiry,
        MotionKind::RequestForInformation,
        MotionKind::WithdrawMotion,
        MotionKind::ObjectionToConsideration,
        MotionKind::TakeFromTable,
        MotionKind::Reconsider,
        MotionKind::Rescind,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            MotionKind::Main => "main",
            MotionKind::PostponeIndefinitely => "postpone-indefinitely",
            MotionKind::Amend => "amend",
            MotionKind::Commit => "commit",
            MotionKind::PostponeDefinitely => "postpone-definitely",
            MotionKind::LimitDebate => "limit-debate",
            MotionKind::PreviousQuestion => "previous-question",
            MotionKind::LayOnTable => "lay-on-table",
            MotionKind::OrdersOfTheDay => "orders-of-the-day",
            MotionKind::QuestionOfPrivilege => "question-of-privilege",
            MotionKind::Recess => "recess",
            MotionKind::Adjourn => "adjourn",
            MotionKind::FixTimeToAdjourn => "fix-time-to-adjourn",
            MotionKind::PointOfOrder => "point-of-order",
            MotionKind::Appeal => "appeal",
            MotionKind::Division => "division",
            MotionKind::SuspendRules => "suspend-rules",
            MotionKind::ParliamentaryInquiry => "parliamentary-inquiry",
            MotionKind::RequestForInformation => "request-for-information",
            MotionKind::WithdrawMotion => "withdraw-motion",
            MotionKind::ObjectionToConsideration => "objection-to-consideration",
            MotionKind::TakeFromTable => "take-from-table",
            MotionKind::Reconsider => "reconsider",
            MotionKind::Rescind => "rescind",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            MotionKind::Main => "Main Motion",
            MotionKind::PostponeIndefinitely => "Postpone Indefinitely",
            MotionKind::Amend => "Amend",
            MotionKind::Commit => "Commit",
            MotionKind::PostponeDefinitely => "Postpone Definitely",
            MotionKind::LimitDebate => "Limit Debate",
            MotionKind::PreviousQuestion => "Previous Question",
            MotionKind::LayOnTable => "Lay on the Table",
            MotionKind::OrdersOfTheDay => "Orders of the Day",
            MotionKind::QuestionOfPrivilege => "Question of Privilege",
            MotionKind::Recess => "Recess",
            MotionKind::Adjourn => "Adjourn",
            MotionKind::FixTimeToAdjourn => "Fix Time to Adjourn",
            MotionKind::PointOfOrder => "Point of Order",
            MotionKind::Appeal => "Appeal",
            MotionKind::Division => "Division of the Assembly",
            MotionKind::SuspendRules => "Suspend the Rules",
            MotionKind::ParliamentaryInquiry => "Parliamentary Inquiry",
            MotionKind::RequestForInformation => "Request for Information",
            MotionKind::WithdrawMotion => "Withdraw a Motion",
            MotionKind::ObjectionToConsideration => "Objection to Consideration",
            MotionKind::TakeFromTable => "Take from the Table",
            MotionKind::Reconsider => "Reconsider",
            MotionKind::Rescind => "Rescind",
        }
    }
}

impl std::fmt::Display for MotionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for MotionKind {
    type Err = ProcedureError;

    /// Accepts kebab-case, snake_case or space separated names, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        MotionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ProcedureError::UnknownMotionType(s.to_string()))
    }
}
