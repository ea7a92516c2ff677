//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain settings.

mod debate;
mod quorum;
mod storage;
mod voting;

pub use debate::FileDebateConfig;
pub use quorum::FileQuorumConfig;
pub use storage::{FileLoggingConfig, FileStorageConfig};
pub use voting::FileVotingConfig;

use gavel_domain::{ConfigIssue, ProcedureSettings};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Organization debate defaults
    pub debate: FileDebateConfig,
    /// Quorum rule and membership size
    pub quorum: FileQuorumConfig,
    /// Voting basis and timing
    pub voting: FileVotingConfig,
    /// Meeting state directory
    pub storage: FileStorageConfig,
    /// Proceedings log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Unparseable values are reported as warnings (they fall back to the
    /// default); the resulting settings are then checked as a whole.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.quorum.parse_rule().1);
        issues.extend(self.voting.parse_basis().1);
        issues.extend(self.to_settings().validate());
        issues
    }

    /// Build the procedure settings a new meeting is opened with
    pub fn to_settings(&self) -> ProcedureSettings {
        let mut settings = ProcedureSettings::default()
            .with_debate(self.debate.to_limits())
            .with_quorum(self.quorum.parse_rule().0)
            .with_voting_basis(self.voting.parse_basis().0);
        if let Some(total) = self.quorum.total_membership {
            settings = settings.with_total_membership(total);
        }
        settings.abstention_window_ms = self.voting.abstention_window_secs * 1000;
        settings.early_close_ms = self.voting.early_close_secs * 1000;
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gavel_domain::{ConfigIssueCode, QuorumRule, Severity, VotingBasis};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[debate]
max_speeches_per_member = 2
max_speech_duration_secs = 600
total_time_limit_secs = 3600

[quorum]
rule = "fixed:5"
total_membership = 12

[voting]
basis = "entire-membership"
abstention_window_secs = 90
early_close_secs = 20

[storage]
dir = "/tmp/gavel"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let settings = config.to_settings();

        assert_eq!(settings.quorum, QuorumRule::FixedNumber(5));
        assert_eq!(settings.total_membership, Some(12));
        assert_eq!(settings.voting_basis, VotingBasis::EntireMembership);
        assert_eq!(settings.abstention_window_ms, 90_000);
        assert_eq!(settings.early_close_ms, 20_000);
        assert_eq!(settings.debate.max_speeches_per_member, Some(2));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(config.to_settings(), ProcedureSettings::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_unreachable_quorum() {
        let toml_str = r#"
[quorum]
rule = "fixed:20"
total_membership = 12
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].code, ConfigIssueCode::QuorumUnreachable);
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[quorum]
rule = "most"

[voting]
basis = "entire-membership"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        // bad rule (warning) plus entire-membership with no membership size (error)
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::MembershipUnknown));
    }
}
