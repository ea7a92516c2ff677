//! Voting configuration from TOML (`[voting]` section)

use gavel_domain::settings::{DEFAULT_ABSTENTION_WINDOW_MS, DEFAULT_EARLY_CLOSE_MS};
use gavel_domain::{ConfigIssue, ConfigIssueCode, Severity, VotingBasis};
use serde::{Deserialize, Serialize};

/// Raw voting configuration from TOML
///
/// # Example
///
/// ```toml
/// [voting]
/// basis = "votes-cast"            # "votes-cast", "members-present", "entire-membership"
/// abstention_window_secs = 60
/// early_close_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVotingConfig {
    pub basis: String,
    /// Silent members become abstentions after this long
    pub abstention_window_secs: u64,
    /// The chair may close a vote early after this long
    pub early_close_secs: u64,
}

impl Default for FileVotingConfig {
    fn default() -> Self {
        Self {
            basis: "votes-cast".to_string(),
            abstention_window_secs: DEFAULT_ABSTENTION_WINDOW_MS / 1000,
            early_close_secs: DEFAULT_EARLY_CLOSE_MS / 1000,
        }
    }
}

impl FileVotingConfig {
    pub fn parse_basis(&self) -> (VotingBasis, Vec<ConfigIssue>) {
        match self.basis.parse::<VotingBasis>() {
            Ok(basis) => (basis, vec![]),
            Err(_) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "voting.basis".to_string(),
                        value: self.basis.clone(),
                        valid_values: vec![
                            "votes-cast".to_string(),
                            "members-present".to_string(),
                            "entire-membership".to_string(),
                        ],
                    },
                    message: format!(
                        "voting.basis: unknown value '{}', falling back to 'votes-cast'",
                        self.basis
                    ),
                };
                (VotingBasis::default(), vec![issue])
            }
        }
    }
}
