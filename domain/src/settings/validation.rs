//! Validation of [`ProcedureSettings`](super::ProcedureSettings) combinations.
//!
//! Some combinations can never work (a fixed quorum larger than the
//! membership), others work but probably not as intended. Both are reported
//! as structured issues with a severity.
//!
//! # Examples
//!
//! ```
//! use gavel_domain::settings::ProcedureSettings;
//!
//! let settings = ProcedureSettings::default();
//! assert!(settings.validate().is_empty());
//! ```

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// Fixed quorum larger than the total membership.
    QuorumUnreachable,
    /// Fixed quorum of zero, treated as one.
    QuorumZero,
    /// Entire-membership voting basis with no membership size configured.
    MembershipUnknown,
    /// Debate limit of zero speeches: nobody could ever speak.
    NoSpeechesAllowed,
    /// Early close window is longer than the abstention window.
    EarlyCloseAfterAbstention,
    /// A string field could not be parsed into its enum.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}
