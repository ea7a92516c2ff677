//! Apply Intent use case.
//!
//! One call per user intent: load the committed state, run the engine
//! operation, commit the next state and record what happened.
//!
//! Recognition of queued motions is the one critical section the engine
//! needs from its caller, so those intents run under a single-flight lock.
//! Every other intent relies on the store's version check.

use crate::ports::meeting_store::{MeetingStore, StoreError};
use crate::ports::proceedings_logger::{NoProceedingsLogger, ProceedingsEvent, ProceedingsLogger};
use gavel_domain::motion::MotionProposal;
use gavel_domain::{
    Actor, LogEntry, MeetingState, ProcedureError, RequestId, RequestType, Stance, VoteChoice,
    VotingContext,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ApplyIntentError {
    #[error("{0}")]
    Procedure(#[from] ProcedureError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ApplyIntentError {
    /// Refused by the rules rather than by storage
    pub fn is_procedural(&self) -> bool {
        matches!(self, ApplyIntentError::Procedure(_))
    }
}

/// Something a participant asks the engine to do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    MarkPresent { member: String },
    MarkAbsent { member: String },
    CallToOrder,
    ProposeMotion { proposal: MotionProposal },
    RecognizeQueued { index: usize },
    DismissQueued { index: usize, reason: String },
    AcceptMotion,
    DeclineMotion { reason: String },
    SecondMotion,
    RequestFloor { stance: Stance },
    RecognizeSpeaker,
    YieldFloor,
    OpenVote,
    CastVote { choice: VoteChoice },
    CloseVote { context: Option<VotingContext> },
    Rule { ruling: String },
    RaiseRequest {
        request_type: RequestType,
        content: String,
    },
    AcceptRequest { id: RequestId },
    RespondRequest { id: RequestId, response: String },
    DismissRequest { id: RequestId },
    EscalateRequest { id: RequestId },
    EndRecess,
    RestoreRules,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::MarkPresent { .. } => "mark_present",
            Intent::MarkAbsent { .. } => "mark_absent",
            Intent::CallToOrder => "call_to_order",
            Intent::ProposeMotion { .. } => "propose_motion",
            Intent::RecognizeQueued { .. } => "recognize_queued",
            Intent::DismissQueued { .. } => "dismiss_queued",
            Intent::AcceptMotion => "accept_motion",
            Intent::DeclineMotion { .. } => "decline_motion",
            Intent::SecondMotion => "second_motion",
            Intent::RequestFloor { .. } => "request_floor",
            Intent::RecognizeSpeaker => "recognize_speaker",
            Intent::YieldFloor => "yield_floor",
            Intent::OpenVote => "open_vote",
            Intent::CastVote { .. } => "cast_vote",
            Intent::CloseVote { .. } => "close_vote",
            Intent::Rule { .. } => "rule",
            Intent::RaiseRequest { .. } => "raise_request",
            Intent::AcceptRequest { .. } => "accept_request",
            Intent::RespondRequest { .. } => "respond_request",
            Intent::DismissRequest { .. } => "dismiss_request",
            Intent::EscalateRequest { .. } => "escalate_request",
            Intent::EndRecess => "end_recess",
            Intent::RestoreRules => "restore_rules",
        }
    }

    /// Run the matching engine operation
    pub fn apply(
        &self,
        state: &MeetingState,
        actor: &Actor,
        now: u64,
    ) -> Result<MeetingState, ProcedureError> {
        match self {
            Intent::MarkPresent { member } => state.mark_present(actor, member, now),
            Intent::MarkAbsent { member } => state.mark_absent(actor, member, now),
            Intent::CallToOrder => state.call_to_order(actor, now),
            Intent::ProposeMotion { proposal } => state.propose_motion(actor, proposal.clone(), now),
            Intent::RecognizeQueued { index } => state.recognize_queued(actor, *index, now),
            Intent::DismissQueued { index, reason } => {
                state.dismiss_queued(actor, *index, reason, now)
            }
            Intent::AcceptMotion => state.accept_motion(actor, now),
            Intent::DeclineMotion { reason } => state.decline_motion(actor, reason, now),
            Intent::SecondMotion => state.second_motion(actor, now),
            Intent::RequestFloor { stance } => state.request_floor(actor, *stance, now),
            Intent::RecognizeSpeaker => state.recognize_speaker(actor, now),
            Intent::YieldFloor => state.yield_floor(actor, now),
            Intent::OpenVote => state.open_vote(actor, now),
            Intent::CastVote { choice } => state.cast_vote(actor, *choice, now),
            Intent::CloseVote { context } => state.close_vote(actor, *context, now),
            Intent::Rule { ruling } => state.rule(actor, ruling, now),
            Intent::RaiseRequest {
                request_type,
                content,
            } => state.raise_request(actor, *request_type, content, now),
            Intent::AcceptRequest { id } => state.accept_request(actor, id, now),
            Intent::RespondRequest { id, response } => {
                state.respond_request(actor, id, response, now)
            }
            Intent::DismissRequest { id } => state.dismiss_request(actor, id, now),
            Intent::EscalateRequest { id } => state.escalate_request(actor, id, now),
            Intent::EndRecess => state.end_recess(actor, now),
            Intent::RestoreRules => state.restore_rules(actor, now),
        }
    }
}

/// Input for the [`ApplyIntentUseCase`].
#[derive(Debug, Clone)]
pub struct ApplyIntentInput {
    pub meeting_id: String,
    pub actor: Actor,
    pub intent: Intent,
    /// Milliseconds since the epoch, read by the caller
    pub now: u64,
}

impl ApplyIntentInput {
    pub fn new(meeting_id: impl Into<String>, actor: Actor, intent: Intent, now: u64) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            actor,
            intent,
            now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApplyIntentOutput {
    pub state: MeetingState,
    /// Log entries appended by this call
    pub entries: Vec<LogEntry>,
}

/// Use case for applying one intent against the stored meeting.
pub struct ApplyIntentUseCase {
    store: Arc<dyn MeetingStore>,
    proceedings_logger: Arc<dyn ProceedingsLogger>,
    recognition: Arc<Mutex<()>>,
}

impl Clone for ApplyIntentUseCase {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            proceedings_logger: self.proceedings_logger.clone(),
            recognition: self.recognition.clone(),
        }
    }
}

impl ApplyIntentUseCase {
    pub fn new(store: Arc<dyn MeetingStore>) -> Self {
        Self {
            store,
            proceedings_logger: Arc::new(NoProceedingsLogger),
            recognition: Arc::new(Mutex::new(())),
        }
    }

    /// Create with a proceedings logger.
    pub fn with_proceedings_logger(mut self, logger: Arc<dyn ProceedingsLogger>) -> Self {
        self.proceedings_logger = logger;
        self
    }

    pub async fn execute(&self, input: ApplyIntentInput) -> Result<ApplyIntentOutput, ApplyIntentError> {
        // Concurrent recognitions of the same queued proposal must not both land
        let _guard = match input.intent {
            Intent::RecognizeQueued { .. } => Some(self.recognition.lock().await),
            _ => None,
        };

        let loaded = self.store.load(&input.meeting_id).await?;
        let expected_version = loaded.version;
        let start_len = loaded.log.len();

        let current = match loaded.scheduled_adjournment(input.now) {
            Some(adjourned) => {
                info!("Meeting {} reached its fixed adjournment time", input.meeting_id);
                adjourned
            }
            None => loaded,
        };

        debug!(
            "Applying {} for {} ({}) at version {}",
            input.intent.name(),
            input.actor.name,
            input.actor.role.as_str(),
            expected_version
        );

        let next = match input.intent.apply(&current, &input.actor, input.now) {
            Ok(next) => next,
            Err(e) => {
                warn!("{} rejected for {}: {}", input.intent.name(), input.actor.name, e);
                self.proceedings_logger.log(ProceedingsEvent::new(
                    "intent_rejected",
                    serde_json::json!({
                        "meeting_id": input.meeting_id,
                        "actor": input.actor.name,
                        "intent": input.intent.name(),
                        "reason": e.to_string(),
                    }),
                ));
                if current.version != expected_version {
                    self.store.save(&current, expected_version).await?;
                }
                return Err(e.into());
            }
        };

        self.store.save(&next, expected_version).await?;

        let entries: Vec<LogEntry> = next.log[start_len..].to_vec();
        for entry in &entries {
            self.proceedings_logger.log(ProceedingsEvent::new(
                "proceedings",
                serde_json::json!({
                    "meeting_id": input.meeting_id,
                    "version": next.version,
                    "entry": entry,
                }),
            ));
        }

        info!(
            "{} applied to {} (version {} -> {})",
            input.intent.name(),
            input.meeting_id,
            expected_version,
            next.version
        );

        Ok(ApplyIntentOutput {
            state: next,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gavel_domain::{MotionKind, MotionStatus, ProcedureSettings};
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct InMemoryStore {
        meetings: StdMutex<HashMap<String, MeetingState>>,
    }

    impl InMemoryStore {
        fn with(state: MeetingState) -> Self {
            let store = Self::default();
            store
                .meetings
                .lock()
                .unwrap()
                .insert(state.meeting_id.clone(), state);
            store
        }
    }

    #[async_trait]
    impl MeetingStore for InMemoryStore {
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

        async fn save(&self, state: &MeetingState, expected_version: u64) -> Result<(), StoreError> {
            let mut meetings = self.meetings.lock().unwrap();
            let found = meetings
                .get(&state.meeting_id)
                .map(|s| s.version)
                .ok_or_else(|| StoreError::NotFound(state.meeting_id.clone()))?;
            if found != expected_version {
                return Err(StoreError::VersionConflict {
                    meeting_id: state.meeting_id.clone(),
                    expected: expected_version,
                    found,
                });
            }
            meetings.insert(state.meeting_id.clone(), state.clone());
            Ok(())
        }

        async fn list(&self) -> Result<Vec<String>, StoreError> {
            Ok(self.meetings.lock().unwrap().keys().cloned().collect())
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: StdMutex<Vec<(&'static str, serde_json::Value)>>,
    }

    impl ProceedingsLogger for RecordingLogger {
        fn log(&self, event: ProceedingsEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type, event.payload));
        }
    }

    fn session() -> MeetingState {
        let chair = Actor::chair("chair");
        let mut state = MeetingState::new("board", ProcedureSettings::default());
        for name in ["chair", "alice", "bob"] {
            state = state.mark_present(&chair, name, 0).unwrap();
        }
        state.call_to_order(&chair, 0).unwrap()
    }

    fn input(actor: Actor, intent: Intent, now: u64) -> ApplyIntentInput {
        ApplyIntentInput::new("board", actor, intent, now)
    }

    fn propose_main() -> Intent {
        Intent::ProposeMotion {
            proposal: MotionProposal::new(MotionKind::Main, "allocate $500", "alice"),
        }
    }

    #[tokio::test]
    async fn test_applied_intent_is_committed_and_logged() {
        let store = Arc::new(InMemoryStore::with(session()));
        let logger = Arc::new(RecordingLogger::default());
        let use_case = ApplyIntentUseCase::new(store.clone()).with_proceedings_logger(logger.clone());

        let output = use_case
            .execute(input(Actor::member("alice"), propose_main(), 10))
            .await
            .unwrap();

        assert_eq!(output.entries.len(), 1);
        assert_eq!(output.entries[0].event, "motion_made");
        let stored = store.load("board").await.unwrap();
        assert_eq!(stored.version, output.state.version);
        assert_eq!(stored.stack.top().unwrap().status, MotionStatus::PendingChair);

        let events = logger.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "proceedings");
        assert_eq!(events[0].1["entry"]["actor"], "alice");
    }

    #[tokio::test]
    async fn test_rejected_intent_leaves_store_untouched() {
        let store = Arc::new(InMemoryStore::with(session()));
        let logger = Arc::new(RecordingLogger::default());
        let use_case = ApplyIntentUseCase::new(store.clone()).with_proceedings_logger(logger.clone());
        let before = store.load("board").await.unwrap();

        let err = use_case
            .execute(input(Actor::member("alice"), Intent::AcceptMotion, 10))
            .await
            .unwrap_err();

        assert!(err.is_procedural());
        assert!(matches!(
            err,
            ApplyIntentError::Procedure(ProcedureError::ChairOnly(_))
        ));
        assert_eq!(store.load("board").await.unwrap(), before);
        assert_eq!(logger.events.lock().unwrap()[0].0, "intent_rejected");
    }

    #[tokio::test]
    async fn test_unknown_meeting() {
        let use_case = ApplyIntentUseCase::new(Arc::new(InMemoryStore::default()));
        let err = use_case
            .execute(input(Actor::chair("chair"), Intent::CallToOrder, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplyIntentError::Store(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_concurrent_recognition_applies_once() {
        let chair = Actor::chair("chair");
        let state = session()
            .propose_motion(&Actor::member("alice"), MotionProposal::new(MotionKind::Main, "allocate $500", "alice"), 1)
            .unwrap()
            .accept_motion(&chair, 2)
            .unwrap()
            .second_motion(&Actor::member("bob"), 3)
            .unwrap()
            .request_floor(&Actor::member("bob"), Stance::Con, 4)
            .unwrap()
            .recognize_speaker(&chair, 5)
            .unwrap()
            .propose_motion(
                &Actor::member("alice"),
                MotionProposal::new(MotionKind::Recess, "recess", "alice"),
                6,
            )
            .unwrap()
            .yield_floor(&Actor::member("bob"), 7)
            .unwrap();
        assert_eq!(state.queued.len(), 1);

        let store = Arc::new(InMemoryStore::with(state));
        let use_case = ApplyIntentUseCase::new(store.clone());
        let first = use_case.clone();
        let second = use_case.clone();
        let intent = Intent::RecognizeQueued { index: 0 };

        let (a, b) = tokio::join!(
            first.execute(input(chair.clone(), intent.clone(), 10)),
            second.execute(input(chair.clone(), intent.clone(), 10)),
        );

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let stored = store.load("board").await.unwrap();
        assert!(stored.queued.is_empty());
        assert_eq!(stored.stack.len(), 2);
    }

    #[tokio::test]
    async fn test_fixed_adjournment_applies_before_intent() {
        let mut state = session();
        state.adjourn_at = Some(1_000);
        let store = Arc::new(InMemoryStore::with(state));
        let use_case = ApplyIntentUseCase::new(store.clone());

        let err = use_case
            .execute(input(Actor::member("alice"), propose_main(), 2_000))
            .await
            .unwrap_err();
        assert!(err.is_procedural());
        let stored = store.load("board").await.unwrap();
        assert_eq!(stored.phase, gavel_domain::MeetingPhase::Adjourned);
    }

    #[test]
    fn test_intent_serde_shape() {
        let intent: Intent = serde_json::from_value(serde_json::json!({
            "intent": "cast_vote",
            "choice": "aye"
        }))
        .unwrap();
        assert_eq!(intent, Intent::CastVote { choice: VoteChoice::Aye });
        assert_eq!(intent.name(), "cast_vote");
    }
}
