//! Quorum configuration from TOML (`[quorum]` section)
//!
//! ```toml
//! [quorum]
//! rule = "fraction:2/3"       # or "majority-of-present", "fixed:5", "1/3"
//! total_membership = 24
//! ```

use gavel_domain::{ConfigIssue, ConfigIssueCode, QuorumRule, Severity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQuorumConfig {
    /// Quorum rule: "majority-of-present", "fixed:N", "fraction:2/3", "majority", "1/3", "0.4"
    pub rule: String,
    /// Size of the full membership, when known
    pub total_membership: Option<u32>,
}

impl Default for FileQuorumConfig {
    fn default() -> Self {
        Self {
            rule: "majority-of-present".to_string(),
            total_membership: None,
        }
    }
}

impl FileQuorumConfig {
    /// Parse the rule string, falling back to majority of those present
    pub fn parse_rule(&self) -> (QuorumRule, Vec<ConfigIssue>) {
        match self.rule.parse::<QuorumRule>() {
            Ok(rule) => (rule, vec![]),
            Err(e) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "quorum.rule".to_string(),
                        value: self.rule.clone(),
                        valid_values: vec![
                            "majority-of-present".to_string(),
                            "fixed:N".to_string(),
                            "fraction:N/M".to_string(),
                        ],
                    },
                    message: format!("quorum.rule: {}, falling back to 'majority-of-present'", e),
                };
                (QuorumRule::default(), vec![issue])
            }
        }
    }
}
