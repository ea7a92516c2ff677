//! Core domain concepts shared across all subdomains.
//!
//! - [`ids::MotionId`] / [`ids::RequestId`]: sequence-minted identifiers
//! - [`participant::Actor`]: the acting participant supplied on every call
//! - [`error::ProcedureError`]: typed reasons for refused operations

pub mod error;
pub mod ids;
pub mod participant;
