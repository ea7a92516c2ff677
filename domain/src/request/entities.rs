//! Pending request entities

use crate::core::ids::{MotionId, RequestId};
use crate::motion::MotionKind;
use serde::{Deserialize, Serialize};

/// Kinds of interjection handled outside the motion stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestType {
    PointOfOrder,
    ParliamentaryInquiry,
    RequestForInfo,
    QuestionOfPrivilege,
    WithdrawMotion,
}

impl RequestType {
    pub fn as_str(&self) -> &str {
        match self {
            RequestType::PointOfOrder => "point-of-order",
            RequestType::ParliamentaryInquiry => "parliamentary-inquiry",
            RequestType::RequestForInfo => "request-for-info",
            RequestType::QuestionOfPrivilege => "question-of-privilege",
            RequestType::WithdrawMotion => "withdraw-motion",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            RequestType::PointOfOrder => "Point of Order",
            RequestType::ParliamentaryInquiry => "Parliamentary Inquiry",
            RequestType::RequestForInfo => "Request for Information",
            RequestType::QuestionOfPrivilege => "Question of Privilege",
            RequestType::WithdrawMotion => "Request to Withdraw",
        }
    }

    /// Free-text content must accompany the request
    pub fn requires_content(&self) -> bool {
        !matches!(self, RequestType::WithdrawMotion)
    }

    /// The chair must answer before the request is settled
    pub fn requires_response(&self) -> bool {
        !matches!(self, RequestType::WithdrawMotion)
    }

    /// May be raised while another member holds the floor
    pub fn can_interrupt(&self) -> bool {
        !matches!(self, RequestType::WithdrawMotion)
    }

    /// Motion the request becomes when escalated to the assembly
    pub fn escalates_to(&self) -> Option<MotionKind> {
        match self {
            RequestType::PointOfOrder => Some(MotionKind::PointOfOrder),
            RequestType::QuestionOfPrivilege => Some(MotionKind::QuestionOfPrivilege),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "point-of-order" => Ok(RequestType::PointOfOrder),
            "parliamentary-inquiry" | "inquiry" => Ok(RequestType::ParliamentaryInquiry),
            "request-for-info" | "request-for-information" | "info" => {
                Ok(RequestType::RequestForInfo)
            }
            "question-of-privilege" | "privilege" => Ok(RequestType::QuestionOfPrivilege),
            "withdraw-motion" | "withdraw" => Ok(RequestType::WithdrawMotion),
            _ => Err(format!("Unknown request type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Accepted,
    Responded,
    Dismissed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Responded => "responded",
            RequestStatus::Dismissed => "dismissed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Responded | RequestStatus::Dismissed)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A non-motion interjection awaiting the chair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequest {
    pub id: RequestId,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub raised_by: String,
    pub status: RequestStatus,
    pub content: String,
    pub response: Option<String>,
    pub timestamp: u64,
    /// Motion a withdrawal request was raised against
    #[serde(default)]
    pub target: Option<MotionId>,
}

impl PendingRequest {
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }

    pub fn with_target(mut self, target: MotionId) -> Self {
        self.target = Some(target);
        self
    }
}
