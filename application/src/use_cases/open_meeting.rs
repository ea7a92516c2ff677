//! Open Meeting use case
//!
//! Creates a fresh meeting record from validated procedure settings.

use crate::ports::meeting_store::{MeetingStore, StoreError};
use gavel_domain::{ConfigIssue, MeetingState, ProcedureSettings, Severity};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum OpenMeetingError {
    #[error("Invalid procedure settings: {}", format_issues(.0))]
    InvalidSettings(Vec<ConfigIssue>),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone)]
pub struct OpenMeetingInput {
    pub meeting_id: String,
    pub settings: ProcedureSettings,
}

impl OpenMeetingInput {
    pub fn new(meeting_id: impl Into<String>, settings: ProcedureSettings) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            settings,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeetingOutput {
    pub state: MeetingState,
    /// Warnings that did not block creation
    pub warnings: Vec<ConfigIssue>,
}

pub struct OpenMeetingUseCase {
    store: Arc<dyn MeetingStore>,
}

impl OpenMeetingUseCase {
    pub fn new(store: Arc<dyn MeetingStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, input: OpenMeetingInput) -> Result<OpenMeetingOutput, OpenMeetingError> {
        let (errors, warnings): (Vec<_>, Vec<_>) = input
            .settings
            .validate()
            .into_iter()
            .partition(|issue| issue.severity == Severity::Error);

        if !errors.is_empty() {
            return Err(OpenMeetingError::InvalidSettings(errors));
        }
        for issue in &warnings {
            warn!("{}: {}", input.meeting_id, issue.message);
        }

        let state = MeetingState::new(input.meeting_id, input.settings);
        self.store.create(&state).await?;
        info!(
            "Opened meeting {} (quorum: {})",
            state.meeting_id, state.settings.quorum
        );

        Ok(OpenMeetingOutput { state, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gavel_domain::{ConfigIssueCode, QuorumRule};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockStore {
        meetings: Mutex<HashMap<String, MeetingState>>,
    }

    #[async_trait]
    impl MeetingStore for MockStore {
        async fn load(&self, meeting_id: &str) -> Result<MeetingState, StoreError> {
            self.meetings
                .lock()
                .unwrap()
                .get(meeting_id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(meeting_id.to_string()))
        }

        async fn create(&self, state: &MeetingState) -> Result<(), StoreError> {
            let mut meetings = self.meetings.lock().unwrap();
            if meetings.contains_key(&state.meeting_id) {
                return Err(StoreError::AlreadyExists(state.meeting_id.clone()));
            }
            meetings.insert(state.meeting_id.clone(), state.clone());
            Ok(())
        }

        async fn save(&self, state: &MeetingState, _expected_version: u64) -> Result<(), StoreError> {
            self.meetings
                .lock()
                .unwrap()
                .insert(state.meeting_id.clone(), state.clone());
            Ok(())
        }

        async fn list(&self) -> Result<Vec<String>, StoreError> {
            Ok(self.meetings.lock().unwrap().keys().cloned().collect())
        }
    }

    #[tokio::test]
    async fn test_open_creates_meeting() {
        let store = Arc::new(MockStore::default());
        let use_case = OpenMeetingUseCase::new(store.clone());

        let output = use_case
            .execute(OpenMeetingInput::new("board", ProcedureSettings::default()))
            .await
            .unwrap();

        assert_eq!(output.state.version, 0);
        assert!(output.warnings.is_empty());
        assert_eq!(store.list().await.unwrap(), vec!["board".to_string()]);
    }

    #[tokio::test]
    async fn test_open_twice_fails() {
        let use_case = OpenMeetingUseCase::new(Arc::new(MockStore::default()));
        let input = OpenMeetingInput::new("board", ProcedureSettings::default());
        use_case.execute(input.clone()).await.unwrap();

        let err = use_case.execute(input).await.unwrap_err();
        assert!(matches!(err, OpenMeetingError::Store(StoreError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_unreachable_quorum_rejected() {
        let store = Arc::new(MockStore::default());
        let use_case = OpenMeetingUseCase::new(store.clone());
        let settings = ProcedureSettings::default()
            .with_quorum(QuorumRule::FixedNumber(12))
            .with_total_membership(9);

        let err = use_case
            .execute(OpenMeetingInput::new("board", settings))
            .await
            .unwrap_err();

        match err {
            OpenMeetingError::InvalidSettings(issues) => {
                assert_eq!(issues[0].code, ConfigIssueCode::QuorumUnreachable);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_warnings_do_not_block() {
        let use_case = OpenMeetingUseCase::new(Arc::new(MockStore::default()));
        let settings = ProcedureSettings::default().with_quorum(QuorumRule::FixedNumber(0));

        let output = use_case
            .execute(OpenMeetingInput::new("board", settings))
            .await
            .unwrap();
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].code, ConfigIssueCode::QuorumZero);
    }
}
