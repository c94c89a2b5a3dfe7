//! Integration tests for the chatbot HTTP endpoints.
//!
//! Requests go through the full router (middleware included) with
//! `tower::ServiceExt::oneshot`; bodies are collected with `http-body-util`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use symptom_intake::adapters::http::{app_router, ChatbotAppState, HttpSettings};
use symptom_intake::adapters::{
    InMemoryEmergencyNotifier, InMemorySessionStore, InMemoryTranscriptSink, StaticKnowledgeBase,
};
use symptom_intake::application::{
    GetTranscriptHandler, HandleMessageHandler, ResetSessionHandler, SessionLocks,
};
use symptom_intake::domain::intake::{DialogueEngine, DEFAULT_MAX_SLOT_RETRIES};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> Router {
    app_with(&HttpSettings::default())
}

fn app_with(settings: &HttpSettings) -> Router {
    let store = Arc::new(InMemorySessionStore::new(1800));
    let locks = Arc::new(SessionLocks::new());
    let engine = Arc::new(DialogueEngine::standard(DEFAULT_MAX_SLOT_RETRIES).unwrap());

    let state = ChatbotAppState {
        message_handler: Arc::new(HandleMessageHandler::new(
            engine,
            store.clone(),
            Arc::new(InMemoryTranscriptSink::new()),
            Arc::new(InMemoryEmergencyNotifier::new()),
            Arc::new(StaticKnowledgeBase::new()),
            locks.clone(),
        )),
        reset_handler: Arc::new(ResetSessionHandler::new(store.clone(), locks)),
        transcript_handler: Arc::new(GetTranscriptHandler::new(store)),
    };
    app_router(state, settings)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn preflight(app: &Router, origin: &str) -> axum::http::Response<Body> {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/chatbot/message")
        .header("origin", origin)
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn chat(app: &Router, session_id: &str, message: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/chatbot/message",
        Some(json!({ "sessionId": session_id, "message": message })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

// =============================================================================
// Message endpoint
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn headache_dialogue_over_http() {
    let app = app();

    let question = chat(&app, "s1", "I have a headache").await;
    assert_eq!(question["sessionId"], "s1");
    assert_eq!(question["emergencyFlag"], false);
    assert_eq!(question["topicClosed"], false);
    assert_eq!(question["topic"], "headache");
    assert!(question.get("action").is_none());

    let advice = chat(&app, "s1", "it's severe and sudden").await;
    assert_eq!(advice["emergencyFlag"], true);
    assert_eq!(advice["action"], "emergency");
    assert_eq!(advice["tier"], "emergency");
    assert_eq!(advice["topicClosed"], true);
}

#[tokio::test]
async fn greeting_gets_fallback_without_topic() {
    let body = chat(&app(), "s2", "hello").await;

    assert_eq!(body["emergencyFlag"], false);
    assert!(body.get("topic").is_none());
    assert!(body["message"].as_str().unwrap().contains("MEDICAL ASSISTANT"));
}

#[tokio::test]
async fn missing_session_id_is_issued_a_new_one() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/chatbot/message",
        Some(json!({ "message": "I have a cough" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["sessionId"].as_str().unwrap().starts_with("session-"));
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/chatbot/message",
        Some(json!({ "sessionId": "s3" })),
    )
    .await;

    assert!(status.is_client_error());
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

// =============================================================================
// History endpoints
// =============================================================================

#[tokio::test]
async fn transcript_lists_both_sides() {
    let app = app();
    chat(&app, "h1", "I have a fever").await;

    let (status, body) = send(&app, Method::GET, "/api/chatbot/messages/h1", None).await;

    assert_eq!(status, StatusCode::OK);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["isUser"], true);
    assert_eq!(messages[0]["message"], "I have a fever");
    assert_eq!(messages[1]["isUser"], false);
    assert_eq!(messages[1]["topic"], "fever");
}

#[tokio::test]
async fn unknown_session_has_empty_transcript() {
    let (status, body) = send(&app(), Method::GET, "/api/chatbot/messages/nobody", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"], json!([]));
}

#[tokio::test]
async fn delete_clears_the_session() {
    let app = app();
    chat(&app, "d1", "fever").await;

    let (status, body) = send(&app, Method::DELETE, "/api/chatbot/messages/d1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cleared"], true);

    let (_, body) = send(&app, Method::GET, "/api/chatbot/messages/d1", None).await;
    assert_eq!(body["messages"], json!([]));
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn configured_origin_passes_preflight() {
    let app = app_with(&HttpSettings {
        cors_origins: vec!["http://localhost:5173".to_string(), "\n".to_string()],
        ..Default::default()
    });

    let response = preflight(&app, "http://localhost:5173").await;

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn unlisted_origin_gets_no_allow_header() {
    let app = app_with(&HttpSettings {
        cors_origins: vec!["http://localhost:5173".to_string()],
        ..Default::default()
    });

    let response = preflight(&app, "http://evil.example").await;

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn no_configured_origins_allows_any() {
    let response = preflight(&app(), "http://anywhere.example").await;
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
