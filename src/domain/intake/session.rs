//! Intake session aggregate.
//!
//! One session per client-generated id. It holds the active topic, the
//! slots collected for it and the conversation history. All mutation goes
//! through methods so the stage, topic and counters stay consistent.

use serde::{Deserialize, Serialize};

use super::slot::{SlotName, SlotValue, Slots};
use super::stage::DialogueStage;
use super::topic::Topic;
use crate::domain::foundation::{SessionId, StateMachine, Timestamp, TurnId, ValidationError};

/// One message in the session history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub is_user: bool,
    pub text: String,
    pub timestamp: Timestamp,
    /// Topic active when the turn was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeSession {
    session_id: SessionId,
    current_topic: Option<Topic>,
    #[serde(default)]
    stage: DialogueStage,
    #[serde(default)]
    slots: Slots,
    #[serde(default)]
    step: u32,
    #[serde(default)]
    failed_attempts: u32,
    #[serde(default)]
    history: Vec<Turn>,
    created_at: Timestamp,
    last_active_at: Timestamp,
}

impl IntakeSession {
    pub fn new(session_id: SessionId, now: Timestamp) -> Self {
        Self {
            session_id,
            current_topic: None,
            stage: DialogueStage::Idle,
            slots: Slots::new(),
            step: 0,
            failed_attempts: 0,
            history: Vec::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn current_topic(&self) -> Option<Topic> {
        self.current_topic
    }

    pub fn stage(&self) -> DialogueStage {
        self.stage
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    /// Accepted slot answers within the current topic.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Consecutive unreadable answers for the open slot.
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn last_active_at(&self) -> Timestamp {
        self.last_active_at
    }

    /// A topic is active exactly while a slot is awaited.
    pub fn is_consistent(&self) -> bool {
        match (self.current_topic, self.stage) {
            (None, DialogueStage::Idle) => self.slots.is_empty() && self.step == 0,
            (Some(_), DialogueStage::AwaitingSlot(_)) => true,
            _ => false,
        }
    }

    pub fn is_expired(&self, idle_secs: u64, now: &Timestamp) -> bool {
        self.last_active_at.has_idled(idle_secs, now)
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations
    // ───────────────────────────────────────────────────────────────

    /// Starts a topic with empty slots.
    pub fn enter_topic(&mut self, topic: Topic) {
        self.current_topic = Some(topic);
        self.slots.clear();
        self.step = 0;
        self.failed_attempts = 0;
    }

    /// Stores an accepted answer.
    pub fn fill_slot(&mut self, name: SlotName, value: SlotValue) {
        self.slots.insert(name, value);
        self.step += 1;
        self.failed_attempts = 0;
    }

    /// Counts an unreadable answer and returns the new consecutive count.
    pub fn record_failed_attempt(&mut self) -> u32 {
        self.failed_attempts += 1;
        self.failed_attempts
    }

    /// Moves to `target` if the dialogue stage machine allows it.
    pub fn move_to(&mut self, target: DialogueStage) -> Result<(), ValidationError> {
        if self.stage == target {
            return Ok(());
        }
        self.stage = self.stage.transition_to(target)?;
        Ok(())
    }

    /// Clears the topic and its slots so the next message is classified.
    pub fn close_topic(&mut self) {
        self.current_topic = None;
        self.slots.clear();
        self.step = 0;
        self.failed_attempts = 0;
        self.stage = DialogueStage::Idle;
    }

    /// Appends a turn tagged with the topic it belongs to.
    pub fn append_turn(
        &mut self,
        is_user: bool,
        text: impl Into<String>,
        topic: Option<Topic>,
        now: Timestamp,
    ) -> &Turn {
        let turn = Turn {
            id: TurnId::new(),
            is_user,
            text: text.into(),
            timestamp: now,
            topic,
        };
        self.history.push(turn);
        self.last_active_at = now;
        &self.history[self.history.len() - 1]
    }

    /// Drops the oldest turns so at most `max_turns` remain; 0 keeps
    /// everything. Returns how many turns were dropped.
    pub fn trim_history(&mut self, max_turns: usize) -> usize {
        if max_turns == 0 || self.history.len() <= max_turns {
            return 0;
        }
        let excess = self.history.len() - max_turns;
        self.history.drain(..excess);
        excess
    }

    pub fn touch(&mut self, now: Timestamp) {
        self.last_active_at = now;
    }
}
