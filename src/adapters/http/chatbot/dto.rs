//! HTTP DTOs for chatbot endpoints.
//!
//! The wire format is camelCase to match the existing chat client.

use serde::{Deserialize, Serialize};

use crate::application::handlers::ResetSessionResult;
use crate::domain::intake::{Topic, Turn};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One chat message from the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    /// Missing ids are replaced server-side, like malformed ones.
    #[serde(default)]
    pub session_id: String,
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One history entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub id: String,
    pub message: String,
    pub is_user: bool,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
}

impl From<Turn> for TurnResponse {
    fn from(turn: Turn) -> Self {
        Self {
            id: turn.id.to_string(),
            message: turn.text,
            is_user: turn.is_user,
            timestamp: turn.timestamp.as_datetime().to_rfc3339(),
            topic: turn.topic,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResponse {
    pub session_id: String,
    pub messages: Vec<TurnResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub session_id: String,
    pub cleared: bool,
}

impl From<ResetSessionResult> for ResetResponse {
    fn from(result: ResetSessionResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            cleared: result.cleared,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::foundation::TurnId;

    #[test]
    fn message_request_reads_camel_case() {
        let req: MessageRequest =
            serde_json::from_str(r#"{"sessionId":"s1","message":"I have a fever"}"#).unwrap();
        assert_eq!(req.session_id, "s1");
        assert_eq!(req.message, "I have a fever");
    }

    #[test]
    fn message_request_without_session_id_defaults_to_empty() {
        let req: MessageRequest = serde_json::from_str(r#"{"message":"hello"}"#).unwrap();
        assert!(req.session_id.is_empty());
    }

    #[test]
    fn turn_response_serializes_camel_case() {
        let turn = Turn {
            id: TurnId::new(),
            is_user: true,
            text: "I have a cough".to_string(),
            timestamp: Timestamp::now(),
            topic: Some(Topic::Cough),
        };
        let json = serde_json::to_value(TurnResponse::from(turn)).unwrap();
        assert_eq!(json["isUser"], true);
        assert_eq!(json["message"], "I have a cough");
        assert_eq!(json["topic"], "cough");
    }
}
