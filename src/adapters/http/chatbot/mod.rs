//! HTTP adapter for the chatbot endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, MessageRequest, ResetResponse, TranscriptResponse, TurnResponse};
pub use handlers::{ChatbotApiError, ChatbotAppState};
pub use routes::chatbot_routes;
