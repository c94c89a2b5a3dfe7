//! HTTP handlers for chatbot endpoints.
//!
//! These handlers connect Axum routes to the intake command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    GetTranscriptHandler, GetTranscriptQuery, HandleMessageCommand, HandleMessageHandler,
    ResetSessionCommand, ResetSessionHandler,
};
use crate::domain::foundation::{DomainError, ErrorCode};

use super::dto::{ErrorResponse, MessageRequest, ResetResponse, TranscriptResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the chatbot routes.
#[derive(Clone)]
pub struct ChatbotAppState {
    pub message_handler: Arc<HandleMessageHandler>,
    pub reset_handler: Arc<ResetSessionHandler>,
    pub transcript_handler: Arc<GetTranscriptHandler>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chatbot/message - Process one chat message
pub async fn post_message(
    State(state): State<ChatbotAppState>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ChatbotApiError> {
    let Json(req) = payload?;
    let reply = state
        .message_handler
        .handle(HandleMessageCommand {
            session_id: req.session_id,
            message: req.message,
        })
        .await;
    Ok(Json(reply))
}

/// DELETE /api/chatbot/messages/:session_id - Clear a session
pub async fn reset_session(
    State(state): State<ChatbotAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ChatbotApiError> {
    let result = state
        .reset_handler
        .handle(ResetSessionCommand { session_id })
        .await?;
    Ok(Json(ResetResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/chatbot/messages/:session_id - Session history
pub async fn get_transcript(
    State(state): State<ChatbotAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ChatbotApiError> {
    let turns = state
        .transcript_handler
        .handle(GetTranscriptQuery {
            session_id: session_id.clone(),
        })
        .await?;
    Ok(Json(TranscriptResponse {
        session_id,
        messages: turns.into_iter().map(Into::into).collect(),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ChatbotApiError(DomainError);

impl From<DomainError> for ChatbotApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ChatbotApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DomainError::validation("body", rejection.body_text()))
    }
}

impl IntoResponse for ChatbotApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0.code() {
            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::SessionNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,
            ErrorCode::StorageError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message);
        (status, Json(body)).into_response()
    }
}
