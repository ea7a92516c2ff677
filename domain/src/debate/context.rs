//! Debate context: the speaking queue and speeches on the current question.
//!
//! A fresh context is started whenever a motion is pushed; the previous one
//! is checkpointed under the new motion's id and restored when that motion
//! is resolved.

use serde::{Deserialize, Serialize};

/// Side a speaker takes on the pending question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Pro,
    Con,
}

impl std::str::FromStr for Stance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pro" | "for" => Ok(Stance::Pro),
            "con" | "against" => Ok(Stance::Con),
            _ => Err(format!("Unknown stance: {}. Valid: pro, con", s)),
        }
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stance::Pro => write!(f, "pro"),
            Stance::Con => write!(f, "con"),
        }
    }
}

/// A member waiting to speak
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakingQueueEntry {
    pub participant: String,
    pub stance: Stance,
    pub request_time: u64,
    pub has_spoken_before: bool,
    /// 0 if the member has not spoken on this question
    pub last_spoke_time: u64,
}

impl SpeakingQueueEntry {
    pub fn new(participant: impl Into<String>, stance: Stance, request_time: u64) -> Self {
        Self {
            participant: participant.into(),
            stance,
            request_time,
            has_spoken_before: false,
            last_spoke_time: 0,
        }
    }

    pub fn spoken_at(mut self, last_spoke_time: u64) -> Self {
        self.has_spoken_before = true;
        self.last_spoke_time = last_spoke_time;
        self
    }
}

/// A speech given (or being given) on the current question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speech {
    pub participant: String,
    pub stance: Stance,
    pub started_at: u64,
    pub ended_at: Option<u64>,
}

/// The member holding the floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSpeaker {
    pub participant: String,
    pub stance: Stance,
    pub started_at: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DebateContext {
    pub queue: Vec<SpeakingQueueEntry>,
    pub history: Vec<Speech>,
    pub current_speaker: Option<CurrentSpeaker>,
}

impl DebateContext {
    pub fn speech_count(&self, member: &str) -> u32 {
        self.history
            .iter()
            .filter(|s| s.participant == member)
            .count() as u32
    }

    /// Start time of the member's latest speech
    pub fn last_spoke(&self, member: &str) -> Option<u64> {
        self.history
            .iter()
            .filter(|s| s.participant == member)
            .map(|s| s.started_at)
            .max()
    }

    pub fn is_queued(&self, member: &str) -> bool {
        self.queue.iter().any(|e| e.participant == member)
    }

    pub fn floor_holder(&self) -> Option<&str> {
        self.current_speaker.as_ref().map(|s| s.participant.as_str())
    }

    /// Milliseconds of debate so far; a speech still in progress counts up to `now`
    pub fn elapsed_ms(&self, now: u64) -> u64 {
        self.history
            .iter()
            .map(|s| s.ended_at.unwrap_or(now).saturating_sub(s.started_at))
            .sum()
    }

    /// Close the open speech of `member`, if there is one
    pub fn end_speech(&mut self, member: &str, now: u64) {
        if let Some(speech) = self
            .history
            .iter_mut()
            .rev()
            .find(|s| s.participant == member && s.ended_at.is_none())
        {
            speech.ended_at = Some(now);
        }
        if self.floor_holder() == Some(member) {
            self.current_speaker = None;
        }
    }
}
