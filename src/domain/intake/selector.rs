//! Chooses the next question or the final advisory for a topic.

use super::advisories::Advisory;
use super::catalog::TopicDefinition;
use super::slot::{SlotName, Slots};
use super::stage::DialogueStage;

/// What the dialogue should say next for the active topic.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A required slot is still open; ask for it.
    Ask { slot: SlotName, question: String },
    /// Every required slot is filled; the topic is closed with this advisory.
    Resolve(Advisory),
}

impl Selection {
    /// Stage the session is in after this selection is emitted.
    pub fn stage(&self) -> DialogueStage {
        match self {
            Selection::Ask { slot, .. } => DialogueStage::AwaitingSlot(*slot),
            Selection::Resolve(_) => DialogueStage::Resolved,
        }
    }
}

/// Pure mapping from (definition, filled slots) to the next [`Selection`].
///
/// Because the output only depends on its inputs, calling it again after a
/// failed extraction re-emits the same question.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseSelector;

impl ResponseSelector {
    pub fn new() -> Self {
        Self
    }

    pub fn select(&self, definition: &TopicDefinition, slots: &Slots) -> Selection {
        match definition.open_slot(slots) {
            Some(spec) => Selection::Ask {
                slot: spec.name,
                question: spec.question(slots),
            },
            None => Selection::Resolve(definition.resolve(slots)),
        }
    }
}
