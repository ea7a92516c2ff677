//! Port for meeting state persistence.
//!
//! The engine produces complete next states; a store commits them. `save`
//! takes the version the caller loaded so concurrent writers cannot
//! silently overwrite each other.

use async_trait::async_trait;
use gavel_domain::MeetingState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Meeting not found: {0}")]
    NotFound(String),

    #[error("Invalid meeting id: {0}")]
    InvalidId(String),

    #[error("Meeting already exists: {0}")]
    AlreadyExists(String),

    #[error("Meeting {meeting_id} changed underneath us: expected version {expected}, found {found}")]
    VersionConflict {
        meeting_id: String,
        expected: u64,
        found: u64,
    },

    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Invalid stored state: {0}")]
    Serialization(String),
}

#[async_trait]
pub trait MeetingStore: Send + Sync {
    async fn load(&self, meeting_id: &str) -> Result<MeetingState, StoreError>;

    /// Store a brand new meeting
    async fn create(&self, state: &MeetingState) -> Result<(), StoreError>;

    /// Replace the stored state if it is still at `expected_version`
    async fn save(&self, state: &MeetingState, expected_version: u64) -> Result<(), StoreError>;

    async fn list(&self) -> Result<Vec<String>, StoreError>;
}
