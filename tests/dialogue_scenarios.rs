//! End-to-end dialogue scenarios through the message handler.
//!
//! Every scenario runs against in-memory adapters so the full flow
//! (session load, engine, persistence, transcript, alerts) is exercised
//! without external services.

use std::sync::Arc;

use symptom_intake::adapters::{
    FileSessionStore, InMemoryEmergencyNotifier, InMemorySessionStore, InMemoryTranscriptSink,
    StaticKnowledgeBase,
};
use symptom_intake::application::{
    GetTranscriptHandler, GetTranscriptQuery, HandleMessageCommand, HandleMessageHandler,
    ResetSessionCommand, ResetSessionHandler, SessionLocks,
};
use symptom_intake::domain::foundation::SessionId;
use symptom_intake::domain::intake::advisories::{FALLBACK_MESSAGE, RETRY_EXHAUSTED_MESSAGE};
use symptom_intake::domain::intake::{
    DialogueEngine, DialogueStage, Reply, ReplyAction, SlotName, Tier, Topic,
    DEFAULT_MAX_SLOT_RETRIES,
};
use symptom_intake::ports::SessionStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Clinic {
    store: Arc<dyn SessionStore>,
    transcript: Arc<InMemoryTranscriptSink>,
    notifier: Arc<InMemoryEmergencyNotifier>,
    locks: Arc<SessionLocks>,
    handler: HandleMessageHandler,
}

impl Clinic {
    fn with_store(store: Arc<dyn SessionStore>, max_slot_retries: u32) -> Self {
        let transcript = Arc::new(InMemoryTranscriptSink::new());
        let notifier = Arc::new(InMemoryEmergencyNotifier::new());
        let locks = Arc::new(SessionLocks::new());
        let engine = Arc::new(DialogueEngine::standard(max_slot_retries).unwrap());
        let handler = HandleMessageHandler::new(
            engine,
            store.clone(),
            transcript.clone(),
            notifier.clone(),
            Arc::new(StaticKnowledgeBase::new()),
            locks.clone(),
        );
        Self {
            store,
            transcript,
            notifier,
            locks,
            handler,
        }
    }

    fn new() -> Self {
        Self::with_store(
            Arc::new(InMemorySessionStore::new(1800)),
            DEFAULT_MAX_SLOT_RETRIES,
        )
    }

    async fn say(&self, session_id: &str, message: &str) -> Reply {
        self.handler
            .handle(HandleMessageCommand {
                session_id: session_id.to_string(),
                message: message.to_string(),
            })
            .await
    }

    async fn stage(&self, session_id: &str) -> DialogueStage {
        let id = SessionId::new(session_id).unwrap();
        self.store
            .load(&id)
            .await
            .unwrap()
            .map(|s| s.stage().clone())
            .unwrap_or_default()
    }
}

// =============================================================================
// Fever
// =============================================================================

#[tokio::test]
async fn moderate_fever_walks_through_both_slots_then_resets() {
    let clinic = Clinic::new();

    let first = clinic.say("f1", "I think I have a fever").await;
    assert_eq!(first.topic, Some(Topic::Fever));
    assert!(first.message.starts_with("FEVER ASSESSMENT"));
    assert_eq!(
        clinic.stage("f1").await,
        DialogueStage::AwaitingSlot(SlotName::Temperature)
    );

    let second = clinic.say("f1", "38.5").await;
    assert!(second.message.contains("MODERATE FEVER - 38.5°C"));
    assert_eq!(
        clinic.stage("f1").await,
        DialogueStage::AwaitingSlot(SlotName::Duration)
    );

    let third = clinic.say("f1", "2 days").await;
    assert!(third.message.contains("FEVER MANAGEMENT - 38.5°C for 2 days"));
    assert!(third.topic_closed);
    assert_eq!(third.tier, Some(Tier::Escalate));
    assert!(!third.emergency_flag);
    assert_eq!(clinic.stage("f1").await, DialogueStage::Idle);

    // The same session can start over with a new complaint
    let next = clinic.say("f1", "now I have a cough").await;
    assert_eq!(next.topic, Some(Topic::Cough));
}

#[tokio::test]
async fn high_fever_resolves_immediately_as_emergency() {
    let clinic = Clinic::new();
    clinic.say("f2", "fever").await;

    let reply = clinic.say("f2", "it's 39.5").await;

    assert_eq!(reply.tier, Some(Tier::Emergency));
    assert!(reply.emergency_flag);
    assert_eq!(reply.action, Some(ReplyAction::Emergency));
    assert!(reply.topic_closed);
    assert_eq!(clinic.notifier.alert_count().await, 1);
}

#[tokio::test]
async fn fahrenheit_reading_is_converted() {
    let clinic = Clinic::new();
    clinic.say("f3", "my temperature is up").await;

    let reply = clinic.say("f3", "101.3 F").await;

    assert!(reply.message.contains("MODERATE FEVER - 38.5°C"));
}

#[tokio::test]
async fn unrecognized_answers_reprompt_without_progress() {
    let clinic = Clinic::new();
    clinic.say("f4", "fever").await;

    let reply = clinic.say("f4", "quite warm I guess").await;

    assert!(reply.message.starts_with("FEVER ASSESSMENT"));
    assert!(!reply.topic_closed);
    assert_eq!(
        clinic.stage("f4").await,
        DialogueStage::AwaitingSlot(SlotName::Temperature)
    );
}

#[tokio::test]
async fn retry_cap_abandons_the_topic() {
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(1800));
    let clinic = Clinic::with_store(store, 2);
    clinic.say("f5", "fever").await;

    clinic.say("f5", "no idea").await;
    let reply = clinic.say("f5", "still no idea").await;

    assert_eq!(reply.message, RETRY_EXHAUSTED_MESSAGE);
    assert!(reply.topic_closed);
    assert_eq!(clinic.stage("f5").await, DialogueStage::Idle);
}

// =============================================================================
// Other topics
// =============================================================================

#[tokio::test]
async fn sudden_severe_headache_is_an_emergency() {
    let clinic = Clinic::new();

    let question = clinic.say("s1", "I have a headache").await;
    assert!(question.message.starts_with("HEADACHE ASSESSMENT"));
    assert!(!question.emergency_flag);

    let reply = clinic.say("s1", "it's severe and sudden").await;
    assert!(reply.message.contains("SEVERE HEADACHE"));
    assert!(reply.emergency_flag);
    assert!(reply.topic_closed);
    assert_eq!(clinic.stage("s1").await, DialogueStage::Idle);
}

#[tokio::test]
async fn cold_resolves_without_questions() {
    let clinic = Clinic::new();

    let reply = clinic.say("c1", "I caught a cold").await;

    assert!(reply.message.starts_with("COLD / FLU SYMPTOMS"));
    assert_eq!(reply.tier, Some(Tier::SelfCare));
    assert!(reply.topic_closed);
}

#[tokio::test]
async fn chest_pain_is_flagged_and_alerted() {
    let clinic = Clinic::new();

    let reply = clinic.say("c2", "sharp chest pain since this morning").await;

    assert!(reply.emergency_flag);
    assert_eq!(reply.topic, Some(Topic::ChestPain));
    let alerts = clinic.notifier.alerts().await;
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].matched_keywords.contains(&"chest pain".to_string()));
}

#[tokio::test]
async fn emergency_keyword_mid_dialogue_is_flagged() {
    let clinic = Clinic::new();
    clinic.say("c3", "stomach ache").await;

    let reply = clinic.say("c3", "nausea, and earlier I passed out").await;

    assert!(reply.emergency_flag);
    assert_eq!(reply.action, Some(ReplyAction::Emergency));
    // The advisory itself is still the ordinary one
    assert_eq!(reply.tier, Some(Tier::SelfCare));
}

// =============================================================================
// Fallback and knowledge
// =============================================================================

#[tokio::test]
async fn greeting_gets_the_fallback() {
    let clinic = Clinic::new();

    let reply = clinic.say("s2", "hello").await;

    assert_eq!(reply.message, FALLBACK_MESSAGE);
    assert_eq!(reply.topic, None);
    assert!(!reply.emergency_flag);
    assert_eq!(clinic.stage("s2").await, DialogueStage::Idle);
}

#[tokio::test]
async fn condition_question_gets_an_article() {
    let clinic = Clinic::new();

    let reply = clinic.say("k1", "how do you treat diabetes").await;

    assert!(reply.message.starts_with("DIABETES - TREATMENT"));
    assert_eq!(reply.topic, None);
    assert_eq!(clinic.stage("k1").await, DialogueStage::Idle);
}

// =============================================================================
// History and reset
// =============================================================================

#[tokio::test]
async fn transcript_and_history_record_every_turn() {
    let clinic = Clinic::new();
    clinic.say("h1", "bad cough").await;
    clinic.say("h1", "dry and tickly").await;

    let entries = clinic
        .transcript
        .entries_for(&SessionId::new("h1").unwrap())
        .await;
    assert_eq!(entries.len(), 4);

    let history = GetTranscriptHandler::new(clinic.store.clone())
        .handle(GetTranscriptQuery {
            session_id: "h1".to_string(),
        })
        .await
        .unwrap();
    let speakers: Vec<bool> = history.iter().map(|t| t.is_user).collect();
    assert_eq!(speakers, vec![true, false, true, false]);
    assert_eq!(history[2].text, "dry and tickly");
}

#[tokio::test]
async fn reset_clears_an_open_topic() {
    let clinic = Clinic::new();
    clinic.say("r1", "fever").await;

    let result = ResetSessionHandler::new(clinic.store.clone(), clinic.locks.clone())
        .handle(ResetSessionCommand {
            session_id: "r1".to_string(),
        })
        .await
        .unwrap();
    assert!(result.cleared);

    // "38" on a fresh session is no longer an answer to anything
    let reply = clinic.say("r1", "38").await;
    assert_eq!(reply.message, FALLBACK_MESSAGE);
}

#[tokio::test]
async fn file_backend_keeps_the_dialogue_going() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(dir.path(), 1800));
    let clinic = Clinic::with_store(store, DEFAULT_MAX_SLOT_RETRIES);

    clinic.say("y1", "migraine").await;
    let reply = clinic.say("y1", "mild and throbbing").await;

    assert!(reply.message.starts_with("HEADACHE MANAGEMENT"));
    assert_eq!(reply.tier, Some(Tier::SelfCare));
}
