//! HandleMessageHandler - Orchestrates one chat message end to end.
//!
//! Load (or create) the session under its lock, run the dialogue engine,
//! fill in knowledge or fallback text for unclassified input, persist, then
//! forward the turns and any emergency alert. The caller always gets a
//! reply: store, sink and notifier failures are logged and swallowed.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::SessionLocks;
use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::intake::{
    Advance, DialogueEngine, EmergencyScan, IntakeSession, KnowledgeQuery, Reply, Topic,
};
use crate::ports::{
    EmergencyAlert, EmergencyNotifier, KnowledgeSource, SessionStore, SessionStoreError,
    TranscriptEntry, TranscriptSink,
};

/// Turns kept per session unless [`HandleMessageHandler::with_history_limit`] says otherwise.
pub const DEFAULT_MAX_HISTORY_TURNS: usize = 200;

/// Command carrying one raw chat message.
#[derive(Debug, Clone)]
pub struct HandleMessageCommand {
    /// Client-generated id; replaced by a fresh id when malformed.
    pub session_id: String,
    pub message: String,
}

/// Handler for incoming chat messages.
pub struct HandleMessageHandler {
    engine: Arc<DialogueEngine>,
    store: Arc<dyn SessionStore>,
    transcript: Arc<dyn TranscriptSink>,
    notifier: Arc<dyn EmergencyNotifier>,
    knowledge: Arc<dyn KnowledgeSource>,
    locks: Arc<SessionLocks>,
    max_history_turns: usize,
}

impl HandleMessageHandler {
    pub fn new(
        engine: Arc<DialogueEngine>,
        store: Arc<dyn SessionStore>,
        transcript: Arc<dyn TranscriptSink>,
        notifier: Arc<dyn EmergencyNotifier>,
        knowledge: Arc<dyn KnowledgeSource>,
        locks: Arc<SessionLocks>,
    ) -> Self {
        Self {
            engine,
            store,
            transcript,
            notifier,
            knowledge,
            locks,
            max_history_turns: DEFAULT_MAX_HISTORY_TURNS,
        }
    }

    /// Caps the stored history; oldest turns go first. 0 keeps everything.
    pub fn with_history_limit(mut self, max_turns: usize) -> Self {
        self.max_history_turns = max_turns;
        self
    }

    pub async fn handle(&self, cmd: HandleMessageCommand) -> Reply {
        let session_id = match SessionId::new(cmd.session_id) {
            Ok(id) => id,
            Err(err) => {
                let generated = SessionId::generate();
                warn!(error = %err, session_id = %generated, "Malformed session id, issuing a new one");
                generated
            }
        };
        let text = cmd.message;

        let guard = self.locks.acquire(&session_id).await;

        let received_at = Timestamp::now();
        let mut session = self.load_or_create(&session_id, received_at).await;

        let advance = self.engine.advance(&mut session, &text);
        let message = match advance.message() {
            Some(message) => message,
            None => self.unclassified_message(&advance).await,
        };
        let response = self.engine.respond(&session_id, &text, &advance, message);

        let topic = advance.topic();
        let replied_at = Timestamp::now();
        session.append_turn(true, text.clone(), topic, received_at);
        session.append_turn(false, response.reply.message.clone(), topic, replied_at);
        let dropped = session.trim_history(self.max_history_turns);
        if dropped > 0 {
            debug!(session_id = %session_id, dropped, "Trimmed session history");
        }

        if let Err(err) = self.store.save(&session).await {
            error!(session_id = %session_id, error = %err, "Failed to save session");
        }
        drop(guard);

        self.forward(&session_id, &text, true, received_at).await;
        self.forward(&session_id, &response.reply.message, false, replied_at)
            .await;

        if response.scan.is_emergency() {
            self.raise_alert(&session_id, topic, &response.scan, replied_at)
                .await;
        }

        response.reply
    }

    /// Loads the session, or starts a fresh one when it is missing,
    /// expired, unreadable or internally inconsistent.
    async fn load_or_create(&self, session_id: &SessionId, now: Timestamp) -> IntakeSession {
        match self.store.load(session_id).await {
            Ok(Some(session)) if session.is_consistent() => session,
            Ok(Some(session)) => {
                warn!(
                    session_id = %session_id,
                    topic = ?session.current_topic(),
                    stage = ?session.stage(),
                    "Inconsistent session state, starting fresh"
                );
                IntakeSession::new(session_id.clone(), now)
            }
            Ok(None) => {
                debug!(session_id = %session_id, "Starting new session");
                IntakeSession::new(session_id.clone(), now)
            }
            Err(err @ SessionStoreError::Corrupt { .. }) => {
                warn!(session_id = %session_id, error = %err, "Corrupt session, starting fresh");
                IntakeSession::new(session_id.clone(), now)
            }
            Err(err) => {
                error!(session_id = %session_id, error = %err, "Failed to load session, starting fresh");
                IntakeSession::new(session_id.clone(), now)
            }
        }
    }

    async fn unclassified_message(&self, advance: &Advance) -> String {
        let Advance::Unclassified {
            inquiry: Some(query),
        } = advance
        else {
            return self.engine.fallback_message().to_string();
        };

        match self.lookup(query).await {
            Some(article) => article,
            None => self.engine.fallback_message().to_string(),
        }
    }

    async fn lookup(&self, query: &KnowledgeQuery) -> Option<String> {
        match self.knowledge.lookup(query).await {
            Ok(Some(article)) => {
                info!(condition = %query.condition, kind = %query.kind, "Answered knowledge inquiry");
                Some(article.render())
            }
            Ok(None) => None,
            Err(err) => {
                warn!(condition = %query.condition, error = %err, "Knowledge lookup failed");
                None
            }
        }
    }

    async fn forward(&self, session_id: &SessionId, message: &str, is_user: bool, at: Timestamp) {
        let entry = TranscriptEntry {
            session_id: session_id.clone(),
            message: message.to_string(),
            is_user,
            timestamp: at,
        };
        if let Err(err) = self.transcript.append(entry).await {
            warn!(session_id = %session_id, error = %err, "Transcript sink failed");
        }
    }

    async fn raise_alert(
        &self,
        session_id: &SessionId,
        topic: Option<Topic>,
        scan: &EmergencyScan,
        at: Timestamp,
    ) {
        warn!(
            session_id = %session_id,
            topic = ?topic,
            matched = ?scan.matched,
            "Emergency flagged"
        );
        let alert = EmergencyAlert {
            session_id: session_id.clone(),
            topic,
            matched_keywords: scan.matched.clone(),
            raised_at: at,
        };
        if let Err(err) = self.notifier.notify(alert).await {
            warn!(session_id = %session_id, error = %err, "Emergency notifier failed");
        }
    }
}
