//! Debate configuration from TOML (`[debate]` section)
//!
//! Organization defaults; a Limit Debate motion on the stack overrides them.

use gavel_domain::motion::DebateLimits;
use serde::{Deserialize, Serialize};

/// Raw debate limits from TOML
///
/// # Example
///
/// ```toml
/// [debate]
/// max_speeches_per_member = 2
/// max_speech_duration_secs = 600
/// total_time_limit_secs = 3600
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    pub max_speeches_per_member: Option<u32>,
    pub max_speech_duration_secs: Option<u32>,
    pub total_time_limit_secs: Option<u32>,
}

impl FileDebateConfig {
    pub fn to_limits(&self) -> DebateLimits {
        DebateLimits {
            max_speeches_per_member: self.max_speeches_per_member,
            max_speech_duration_secs: self.max_speech_duration_secs,
            total_time_limit_secs: self.total_time_limit_secs,
        }
    }
}
