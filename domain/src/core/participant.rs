//! The acting participant.
//!
//! Identity and role come from the session provider; the engine only reads
//! the role as a flag.

use serde::{Deserialize, Serialize};

/// Role held by a participant for the current meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Presiding officer
    Chair,
    /// Voting member
    #[default]
    Member,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Chair => "chair",
            Role::Member => "member",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chair" | "president" | "moderator" => Ok(Role::Chair),
            "member" => Ok(Role::Member),
            _ => Err(format!("Unknown role: {}. Valid: chair, member", s)),
        }
    }
}

/// The participant issuing an engine call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub role: Role,
}

impl Actor {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    pub fn chair(name: impl Into<String>) -> Self {
        Self::new(name, Role::Chair)
    }

    pub fn member(name: impl Into<String>) -> Self {
        Self::new(name, Role::Member)
    }

    pub fn is_chair(&self) -> bool {
        self.role == Role::Chair
    }
}
