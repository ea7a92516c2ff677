//! Identifiers for records created by the engine.
//!
//! Ids are minted from a counter carried in the meeting state rather than
//! generated randomly, so replaying the same calls yields the same ids.

use serde::{Deserialize, Serialize};

/// Unique identifier for a motion record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MotionId(String);

impl MotionId {
    /// Creates a MotionId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints the id for the given sequence number (e.g. `m-7`).
    pub fn from_sequence(seq: u64) -> Self {
        Self(format!("m-{}", seq))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for MotionId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for MotionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a pending request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_sequence(seq: u64) -> Self {
        Self(format!("r-{}", seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for RequestId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_ids() {
        assert_eq!(MotionId::from_sequence(3).as_str(), "m-3");
        assert_eq!(RequestId::from_sequence(12).to_string(), "r-12");
    }

    #[test]
    fn test_id_from_str() {
        let id: MotionId = "m-1".into();
        assert_eq!(id, MotionId::from_sequence(1));
    }
}
