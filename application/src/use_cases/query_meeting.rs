//! Read-only queries against the stored meeting.

use crate::ports::meeting_store::{MeetingStore, StoreError};
use gavel_domain::{MeetingState, MotionAvailability};
use std::sync::Arc;

pub struct QueryMeetingUseCase {
    store: Arc<dyn MeetingStore>,
}

impl QueryMeetingUseCase {
    pub fn new(store: Arc<dyn MeetingStore>) -> Self {
        Self { store }
    }

    /// Current committed state, with a due fixed adjournment shown as applied
    pub async fn state(&self, meeting_id: &str, now: u64) -> Result<MeetingState, StoreError> {
        let state = self.store.load(meeting_id).await?;
        Ok(state.scheduled_adjournment(now).unwrap_or(state))
    }

    /// Every motion type with whether it is in order right now
    pub async fn availability(
        &self,
        meeting_id: &str,
        now: u64,
    ) -> Result<Vec<MotionAvailability>, StoreError> {
        Ok(self.state(meeting_id, now).await?.availability())
    }

    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut ids = self.store.list().await?;
        ids.sort();
        Ok(ids)
    }
}
