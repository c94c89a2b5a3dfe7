//! Symptom intake dialogue.
//!
//! Detects a topic from free text, collects the slots that topic needs
//! one question at a time and closes it with a graduated advisory.
//!
//! # Module Organization
//!
//! - `topic`, `slot`, `tier` - Value types of the dialogue
//! - `catalog`, `advisories` - The closed topic registry and its templates
//! - `classifier`, `extractor`, `selector`, `emergency` - Pure components
//! - `session`, `stage` - Session aggregate and its stage machine
//! - `engine` - One synchronous dialogue step over a session
//! - `inquiry` - General health questions answered by a knowledge source

pub mod advisories;
mod catalog;
mod classifier;
mod emergency;
mod engine;
mod extractor;
mod inquiry;
mod reply;
mod selector;
mod session;
mod slot;
mod stage;
mod tier;
mod topic;

#[cfg(test)]
mod proptests;

pub use advisories::Advisory;
pub use catalog::{CatalogError, SlotSpec, TopicCatalog, TopicDefinition};
pub use classifier::TopicClassifier;
pub use emergency::{EmergencyDetector, EmergencyScan, EMERGENCY_KEYWORDS};
pub use engine::{expected_stage, Advance, DialogueEngine, Response, DEFAULT_MAX_SLOT_RETRIES};
pub use extractor::{Extraction, SlotExtractor};
pub use inquiry::{Condition, InquiryKind, KnowledgeArticle, KnowledgeQuery};
pub use reply::{Reply, ReplyAction};
pub use selector::{ResponseSelector, Selection};
pub use session::{IntakeSession, Turn};
pub use slot::{SlotKind, SlotName, SlotValue, Slots};
pub use stage::DialogueStage;
pub use tier::Tier;
pub use topic::{Classification, Topic};
