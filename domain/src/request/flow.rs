//! Pending request lifecycle
//!
//! ```text
//! pending ──accept──▶ accepted ──respond──▶ responded
//!    │                   │
//!    └──────dismiss──────┴──────▶ dismissed
//! ```
//!
//! Each transition returns a new record; the input is left as it was.

use super::entities::{PendingRequest, RequestStatus, RequestType};
use crate::core::error::ProcedureError;
use crate::core::ids::RequestId;

impl PendingRequest {
    pub fn create(
        id: RequestId,
        request_type: RequestType,
        raised_by: impl Into<String>,
        content: impl Into<String>,
        now: u64,
    ) -> Result<Self, ProcedureError> {
        let content = content.into();
        if request_type.requires_content() && content.trim().is_empty() {
            return Err(ProcedureError::ContentRequired(request_type));
        }
        Ok(Self {
            id,
            request_type,
            raised_by: raised_by.into(),
            status: RequestStatus::Pending,
            content,
            response: None,
            timestamp: now,
            target: None,
        })
    }

    pub fn accept(&self) -> Result<Self, ProcedureError> {
        self.transition(RequestStatus::Accepted, &[RequestStatus::Pending])
    }

    pub fn respond(&self, text: impl Into<String>) -> Result<Self, ProcedureError> {
        if !self.request_type.requires_response() {
            return Err(ProcedureError::ResponseNotRequired(self.request_type));
        }
        let mut next = self.transition(RequestStatus::Responded, &[RequestStatus::Accepted])?;
        next.response = Some(text.into());
        Ok(next)
    }

    pub fn dismiss(&self) -> Result<Self, ProcedureError> {
        self.transition(
            RequestStatus::Dismissed,
            &[RequestStatus::Pending, RequestStatus::Accepted],
        )
    }

    fn transition(
        &self,
        to: RequestStatus,
        allowed_from: &[RequestStatus],
    ) -> Result<Self, ProcedureError> {
        if !allowed_from.contains(&self.status) {
            return Err(ProcedureError::InvalidRequestTransition {
                id: self.id.clone(),
                from: self.status,
                to,
            });
        }
        let mut next = self.clone();
        next.status = to;
        Ok(next)
    }
}
