//! Pending-request flow: point of order, inquiries, requests for
//! information, questions of privilege and withdrawal requests.
//!
//! Requests never enter the motion stack. A point of order or question of
//! privilege that the chair escalates becomes a separate motion record.

pub mod entities;
pub mod flow;

pub use entities::{PendingRequest, RequestStatus, RequestType};
