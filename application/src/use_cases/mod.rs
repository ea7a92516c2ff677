//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod apply_intent;
pub mod export_minutes;
pub mod open_meeting;
pub mod query_meeting;
