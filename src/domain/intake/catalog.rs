//! Topic definitions: keywords, ordered slots and the resolver of each topic.
//!
//! The catalog is a closed registry. The dialogue engine iterates it
//! generically, so adding a topic means adding one [`TopicDefinition`] here.

use std::collections::HashSet;
use thiserror::Error;

use super::advisories::{self, Advisory};
use super::slot::{SlotKind, SlotName, Slots};
use super::topic::Topic;

/// Builds the question for a slot from what has been collected so far.
pub type Prompt = fn(&Slots) -> String;

/// Decides whether a slot is required given the already-filled slots.
pub type SlotCondition = fn(&Slots) -> bool;

/// Maps a complete set of slots to the final advisory.
pub type Resolver = fn(&Slots) -> Advisory;

/// Declaration of one slot of a topic.
#[derive(Debug, Clone)]
pub struct SlotSpec {
    pub name: SlotName,
    pub kind: SlotKind,
    pub prompt: Prompt,
    /// `None` means always required.
    pub required_when: Option<SlotCondition>,
}

impl SlotSpec {
    pub fn numeric(name: SlotName, prompt: Prompt) -> Self {
        Self {
            name,
            kind: SlotKind::Numeric,
            prompt,
            required_when: None,
        }
    }

    pub fn text(name: SlotName, prompt: Prompt) -> Self {
        Self {
            name,
            kind: SlotKind::Text,
            prompt,
            required_when: None,
        }
    }

    pub fn required_when(mut self, condition: SlotCondition) -> Self {
        self.required_when = Some(condition);
        self
    }

    pub fn is_required(&self, slots: &Slots) -> bool {
        self.required_when.map_or(true, |condition| condition(slots))
    }

    pub fn question(&self, slots: &Slots) -> String {
        (self.prompt)(slots)
    }
}

/// Static description of a topic.
#[derive(Debug, Clone)]
pub struct TopicDefinition {
    pub topic: Topic,
    pub keywords: Vec<String>,
    pub slots: Vec<SlotSpec>,
    pub resolver: Resolver,
}

impl TopicDefinition {
    pub fn new(topic: Topic, keywords: &[&str], slots: Vec<SlotSpec>, resolver: Resolver) -> Self {
        Self {
            topic,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            slots,
            resolver,
        }
    }

    /// First slot, in declaration order, that is required and not yet filled.
    pub fn open_slot(&self, slots: &Slots) -> Option<&SlotSpec> {
        self.slots
            .iter()
            .find(|spec| !slots.is_filled(spec.name) && spec.is_required(slots))
    }

    pub fn slot(&self, name: SlotName) -> Option<&SlotSpec> {
        self.slots.iter().find(|spec| spec.name == name)
    }

    pub fn resolve(&self, slots: &Slots) -> Advisory {
        (self.resolver)(slots)
    }
}

/// Structural problems in a catalog, detected when the engine is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("topic '{0}' has no definition")]
    MissingDefinition(Topic),

    #[error("topic '{0}' is defined more than once")]
    DuplicateDefinition(Topic),

    #[error("topic '{0}' has no classifier keywords")]
    NoKeywords(Topic),

    #[error("topic '{topic}' declares slot '{slot}' more than once")]
    DuplicateSlot { topic: Topic, slot: SlotName },
}

/// Ordered registry of topic definitions. Order is classifier order.
#[derive(Debug, Clone)]
pub struct TopicCatalog {
    definitions: Vec<TopicDefinition>,
}

impl TopicCatalog {
    pub fn new(definitions: Vec<TopicDefinition>) -> Self {
        Self { definitions }
    }

    /// The built-in catalog covering every [`Topic`].
    pub fn standard() -> Self {
        use advisories::*;

        Self::new(vec![
            TopicDefinition::new(
                Topic::Fever,
                &["fever", "temperature", "hot"],
                vec![
                    SlotSpec::numeric(SlotName::Temperature, temperature_question),
                    SlotSpec::text(SlotName::Duration, duration_question)
                        .required_when(is_moderate_fever),
                ],
                resolve_fever,
            ),
            TopicDefinition::new(
                Topic::Headache,
                &["headache", "migraine"],
                vec![SlotSpec::text(SlotName::Severity, severity_question)],
                resolve_headache,
            ),
            TopicDefinition::new(
                Topic::Cough,
                &["cough", "coughing"],
                vec![SlotSpec::text(SlotName::CoughType, cough_type_question)],
                resolve_cough,
            ),
            TopicDefinition::new(
                Topic::Cold,
                &["cold", "flu", "runny nose"],
                vec![],
                resolve_cold,
            ),
            TopicDefinition::new(
                Topic::Stomach,
                &["stomach", "abdominal", "diarrhea"],
                vec![SlotSpec::text(SlotName::Symptoms, stomach_symptoms_question)],
                resolve_stomach,
            ),
            TopicDefinition::new(
                Topic::ChestPain,
                &["chest pain", "heart"],
                vec![],
                resolve_chest_pain,
            ),
            TopicDefinition::new(
                Topic::Breathing,
                &["breathing", "breath", "asthma"],
                vec![],
                resolve_breathing,
            ),
            TopicDefinition::new(
                Topic::Pain,
                &["pain", "hurt"],
                vec![SlotSpec::text(SlotName::Description, pain_description_question)],
                resolve_pain,
            ),
        ])
    }

    pub fn definitions(&self) -> &[TopicDefinition] {
        &self.definitions
    }

    pub fn definition(&self, topic: Topic) -> Option<&TopicDefinition> {
        self.definitions.iter().find(|d| d.topic == topic)
    }

    /// Checks that every topic is defined exactly once and every
    /// definition is well formed.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for definition in &self.definitions {
            if !seen.insert(definition.topic) {
                return Err(CatalogError::DuplicateDefinition(definition.topic));
            }
            if definition.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(CatalogError::NoKeywords(definition.topic));
            }
            let mut slot_names = HashSet::new();
            for spec in &definition.slots {
                if !slot_names.insert(spec.name) {
                    return Err(CatalogError::DuplicateSlot {
                        topic: definition.topic,
                        slot: spec.name,
                    });
                }
            }
        }

        if let Some(missing) = Topic::ALL.iter().find(|t| !seen.contains(*t)) {
            return Err(CatalogError::MissingDefinition(*missing));
        }

        Ok(())
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
