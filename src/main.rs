//! Symptom Intake server
//!
//! Loads configuration, wires the dialogue engine to its adapters and serves
//! the chatbot API.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use symptom_intake::adapters::http::{app_router, ChatbotAppState, HttpSettings};
use symptom_intake::adapters::{
    FileSessionStore, InMemorySessionStore, RedisSessionStore, StaticKnowledgeBase,
    TracingEmergencyNotifier, TracingTranscriptSink,
};
use symptom_intake::application::{
    GetTranscriptHandler, HandleMessageHandler, ResetSessionHandler, SessionLocks, SessionSweeper,
};
use symptom_intake::config::{AppConfig, StorageBackend};
use symptom_intake::domain::intake::DialogueEngine;
use symptom_intake::ports::SessionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let engine = match DialogueEngine::standard(config.intake.max_slot_retries) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            error!(error = %e, "Topic catalog is misconfigured");
            return Err(e.into());
        }
    };

    let store = build_store(&config).await?;
    let locks = Arc::new(SessionLocks::new());

    let state = ChatbotAppState {
        message_handler: Arc::new(HandleMessageHandler::new(
            engine,
            store.clone(),
            Arc::new(TracingTranscriptSink::new()),
            Arc::new(TracingEmergencyNotifier::new()),
            Arc::new(StaticKnowledgeBase::new()),
            locks.clone(),
        )
        .with_history_limit(config.intake.max_history_turns)),
        reset_handler: Arc::new(ResetSessionHandler::new(store.clone(), locks.clone())),
        transcript_handler: Arc::new(GetTranscriptHandler::new(store.clone())),
    };

    let sweeper = SessionSweeper::new(store, locks).spawn(config.intake.sweep_interval());

    let settings = HttpSettings {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
    };
    let app = app_router(state, &settings);

    let addr = config.server.socket_addr()?;
    info!(%addr, backend = ?config.storage.backend, "Symptom intake server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    sweeper.abort();
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn build_store(
    config: &AppConfig,
) -> Result<Arc<dyn SessionStore>, Box<dyn std::error::Error>> {
    let idle = config.intake.session_idle_timeout_secs;
    let store: Arc<dyn SessionStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemorySessionStore::new(idle)),
        StorageBackend::File => Arc::new(FileSessionStore::new(&config.storage.file_path, idle)),
        StorageBackend::Redis => {
            let connect = RedisSessionStore::connect(&config.redis.url, idle);
            let store = tokio::time::timeout(config.redis.timeout(), connect).await??;
            Arc::new(store)
        }
    };
    Ok(store)
}
