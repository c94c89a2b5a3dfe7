//! Dialogue stage of an intake session.

use serde::{Deserialize, Serialize};

use super::slot::SlotName;
use crate::domain::foundation::StateMachine;

/// Where a session is in the slot-filling conversation.
///
/// `Idle` → `AwaitingSlot(slot)`* → `Resolved` → `Idle`. A topic with no
/// required slots goes straight from `Idle` to `Resolved`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "stage", content = "slot", rename_all = "snake_case")]
pub enum DialogueStage {
    #[default]
    Idle,
    AwaitingSlot(SlotName),
    Resolved,
}

impl DialogueStage {
    pub fn awaiting(&self) -> Option<SlotName> {
        match self {
            DialogueStage::AwaitingSlot(slot) => Some(*slot),
            _ => None,
        }
    }
}

impl StateMachine for DialogueStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogueStage::*;
        matches!(
            (self, target),
            (Idle, AwaitingSlot(_))
                | (Idle, Resolved)
                | (AwaitingSlot(_), AwaitingSlot(_))
                | (AwaitingSlot(_), Resolved)
                | (AwaitingSlot(_), Idle)
                | (Resolved, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueStage::*;
        let awaiting = SlotName::ALL.iter().map(|s| AwaitingSlot(*s));
        match self {
            Idle => awaiting.chain([Resolved]).collect(),
            AwaitingSlot(_) => awaiting.chain([Resolved, Idle]).collect(),
            Resolved => vec![Idle],
        }
    }
}
