//! HTTP routes for chatbot endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_transcript, post_message, reset_session, ChatbotAppState};

/// Creates the chatbot router, to be nested under `/api/chatbot`.
pub fn chatbot_routes(state: ChatbotAppState) -> Router {
    Router::new()
        .route("/message", post(post_message))
        .route(
            "/messages/:session_id",
            get(get_transcript).delete(reset_session),
        )
        .with_state(state)
}
