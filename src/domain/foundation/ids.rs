//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Maximum accepted length of a client-supplied session identifier.
pub const MAX_SESSION_ID_LENGTH: usize = 128;

/// Opaque, client-generated identifier of a chat session.
///
/// Clients usually send something like `session-1718031234567`; the value is
/// only ever compared for equality. Blank ids, ids containing control
/// characters or whitespace, and ids longer than [`MAX_SESSION_ID_LENGTH`]
/// are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Validates and wraps a client-supplied identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        if value.len() > MAX_SESSION_ID_LENGTH {
            return Err(ValidationError::invalid_format(
                "session_id",
                format!("longer than {} bytes", MAX_SESSION_ID_LENGTH),
            ));
        }
        if value.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(ValidationError::invalid_format(
                "session_id",
                "contains whitespace or control characters",
            ));
        }
        Ok(Self(value))
    }

    /// Generates a fresh server-side identifier.
    pub fn generate() -> Self {
        Self(format!("session-{}", Uuid::new_v4()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SessionId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

/// Unique identifier for a single history turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(Uuid);

impl TurnId {
    /// Creates a new random TurnId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod session_id {
        use super::*;

        #[test]
        fn accepts_client_style_ids() {
            let id = SessionId::new("session-1718031234567").unwrap();
            assert_eq!(id.as_str(), "session-1718031234567");
            assert_eq!(id.to_string(), "session-1718031234567");
        }

        #[test]
        fn rejects_blank_ids() {
            assert!(SessionId::new("").is_err());
            assert!(SessionId::new("   ").is_err());
        }

        #[test]
        fn rejects_whitespace_and_control_characters() {
            assert!(SessionId::new("abc def").is_err());
            assert!(SessionId::new("abc\u{0007}").is_err());
        }

        #[test]
        fn rejects_overlong_ids() {
            let long = "x".repeat(MAX_SESSION_ID_LENGTH + 1);
            assert!(SessionId::new(long).is_err());
            let max = "x".repeat(MAX_SESSION_ID_LENGTH);
            assert!(SessionId::new(max).is_ok());
        }

        #[test]
        fn generated_ids_are_unique_and_valid() {
            let a = SessionId::generate();
            let b = SessionId::generate();
            assert_ne!(a, b);
            assert!(SessionId::new(a.as_str()).is_ok());
        }

        #[test]
        fn serde_round_trip_validates() {
            let id = SessionId::new("s1").unwrap();
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, "\"s1\"");
            let back: SessionId = serde_json::from_str(&json).unwrap();
            assert_eq!(back, id);

            let bad: Result<SessionId, _> = serde_json::from_str("\"\"");
            assert!(bad.is_err());
        }

        #[test]
        fn parses_from_str() {
            let id: SessionId = "s2".parse().unwrap();
            assert_eq!(id.as_str(), "s2");
        }
    }

    mod turn_id {
        use super::*;

        #[test]
        fn new_ids_are_unique() {
            assert_ne!(TurnId::new(), TurnId::new());
        }

        #[test]
        fn display_matches_uuid() {
            let id = TurnId::new();
            assert_eq!(id.to_string(), id.as_uuid().to_string());
        }
    }
}
