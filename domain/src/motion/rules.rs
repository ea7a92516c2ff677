//! Static per-type motion attributes.
//!
//! | Type | Cat. | Prec. | Vote | Debate | Amend | 2nd | Interrupt |
//! |------|------|-------|------|--------|-------|-----|-----------|
//! | Main | main | - | majority | yes | yes | yes | no |
//! | Postpone Indefinitely | sub | 1 | majority | yes | no | yes | no |
//! | Amend | sub | 2 | majority | yes | yes | yes | no |
//! | Commit | sub | 3 | majority | yes | yes | yes | no |
//! | Postpone Definitely | sub | 4 | majority | yes | yes | yes | no |
//! | Limit Debate | sub | 5 | 2/3 | no | yes | yes | no |
//! | Previous Question | sub | 6 | 2/3 | no | no | yes | no |
//! | Lay on the Table | sub | 7 | majority | no | no | yes | no |
//! | Orders of the Day | priv | 8 | none | no | no | no | yes |
//! | Question of Privilege | priv | 9 | none | no | no | no | yes |
//! | Recess | priv | 10 | majority | no | yes | yes | no |
//! | Adjourn | priv | 11 | majority | no | no | yes | no |
//! | Fix Time to Adjourn | priv | 12 | majority | no | yes | yes | no |
//! | Point of Order | inc | - | none | no | no | no | yes |
//! | Appeal | inc | - | tie-sustains | yes | no | yes | yes |
//! | Division | inc | - | none | no | no | no | yes |
//! | Suspend the Rules | inc | - | 2/3 | no | no | yes | no |
//! | Parliamentary Inquiry | inc | - | none | no | no | no | yes |
//! | Request for Information | inc | - | none | no | no | no | yes |
//! | Withdraw a Motion | inc | - | majority | no | no | no | no |
//! | Objection to Consideration | inc | - | 2/3 | no | no | no | yes |
//! | Take from the Table | bb | - | majority | no | no | yes | no |
//! | Reconsider | bb | - | majority | yes | no | yes | no |
//! | Rescind | bb | - | 2/3 | yes | yes | yes | no |

use super::kind::{MotionCategory, MotionKind, VoteThreshold};
use serde::{Deserialize, Serialize};

/// Highest amendment degree allowed on the stack
pub const MAX_AMENDMENT_DEGREE: u8 = 2;

/// Rule-derived attributes of a motion type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionRules {
    pub category: MotionCategory,
    /// Rank among subsidiary and privileged motions; higher outranks lower
    pub precedence: Option<u8>,
    pub vote_required: VoteThreshold,
    pub debatable: bool,
    pub amendable: bool,
    pub requires_second: bool,
    /// Only non-zero for Amend
    pub max_degree: u8,
    /// May be raised while another member holds the floor
    pub can_interrupt: bool,
}

impl MotionRules {
    const fn new(
        category: MotionCategory,
        precedence: Option<u8>,
        vote_required: VoteThreshold,
        debatable: bool,
        amendable: bool,
        requires_second: bool,
        can_interrupt: bool,
    ) -> Self {
        Self {
            category,
            precedence,
            vote_required,
            debatable,
            amendable,
            requires_second,
            max_degree: 0,
            can_interrupt,
        }
    }

    const fn with_max_degree(mut self, degree: u8) -> Self {
        self.max_degree = degree;
        self
    }
}

impl MotionKind {
    /// Look up the static rules for this motion type
    pub const fn rules(&self) -> MotionRules {
        use MotionCategory::*;
        use VoteThreshold::*;

        match self {
            MotionKind::Main => MotionRules::new(Main, None, Majority, true, true, true, false),

            MotionKind::PostponeIndefinitely => {
                MotionRules::new(Subsidiary, Some(1), Majority, true, false, true, false)
            }
            MotionKind::Amend => {
                MotionRules::new(Subsidiary, Some(2), Majority, true, true, true, false)
                    .with_max_degree(MAX_AMENDMENT_DEGREE)
            }
            MotionKind::Commit => {
                MotionRules::new(Subsidiary, Some(3), Majority, true, true, true, false)
            }
            MotionKind::PostponeDefinitely => {
                MotionRules::new(Subsidiary, Some(4), Majority, true, true, true, false)
            }
            MotionKind::LimitDebate => {
                MotionRules::new(Subsidiary, Some(5), TwoThirds, false, true, true, false)
            }
            MotionKind::PreviousQuestion => {
                MotionRules::new(Subsidiary, Some(6), TwoThirds, false, false, true, false)
            }
            MotionKind::LayOnTable => {
                MotionRules::new(Subsidiary, Some(7), Majority, false, false, true, false)
            }

            MotionKind::OrdersOfTheDay => {
                MotionRules::new(Privileged, Some(8), ChairDecides, false, false, false, true)
            }
            MotionKind::QuestionOfPrivilege => {
                MotionRules::new(Privileged, Some(9), ChairDecides, false, false, false, true)
            }
            MotionKind::Recess => {
                MotionRules::new(Privileged, Some(10), Majority, false, true, true, false)
            }
            MotionKind::Adjourn => {
                MotionRules::new(Privileged, Some(11), Majority, false, false, true, false)
            }
            MotionKind::FixTimeToAdjourn => {
                MotionRules::new(Privileged, Some(12), Majority, false, true, true, false)
            }

            MotionKind::PointOfOrder => {
                MotionRules::new(Incidental, None, ChairDecides, false, false, false, true)
            }
            MotionKind::Appeal => {
                MotionRules::new(Incidental, None, TieSustains, true, false, true, true)
            }
            MotionKind::Division => {
                MotionRules::new(Incidental, None, ChairDecides, false, false, false, true)
            }
            MotionKind::SuspendRules => {
                MotionRules::new(Incidental, None, TwoThirds, false, false, true, false)
            }
            MotionKind::ParliamentaryInquiry => {
                MotionRules::new(Incidental, None, ChairDecides, false, false, false, true)
            }
            MotionKind::RequestForInformation => {
                MotionRules::new(Incidental, None, ChairDecides, false, false, false, true)
            }
            MotionKind::WithdrawMotion => {
                MotionRules::new(Incidental, None, Majority, false, false, false, false)
            }
            MotionKind::ObjectionToConsideration => {
                MotionRules::new(Incidental, None, TwoThirds, false, false, false, true)
            }

            MotionKind::TakeFromTable => {
                MotionRules::new(BringBack, None, Majority, false, false, true, false)
            }
            MotionKind::Reconsider => {
                MotionRules::new(BringBack, None, Majority, true, false, true, false)
            }
            MotionKind::Rescind => {
                MotionRules::new(BringBack, None, TwoThirds, true, true, true, false)
            }
        }
    }

    pub fn category(&self) -> MotionCategory {
        self.rules().category
    }

    pub fn precedence(&self) -> Option<u8> {
        self.rules().precedence
    }

    /// Incidental motions that become stack entries rather than requests
    pub fn converts_to_stack_entry(&self) -> bool {
        matches!(
            self,
            MotionKind::PointOfOrder
                | MotionKind::Appeal
                | MotionKind::Division
                | MotionKind::SuspendRules
        )
    }
}
