//! Slots: the pieces of information a topic collects before resolving.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name of a slot. Each topic declares an ordered subset of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    Temperature,
    Duration,
    Severity,
    CoughType,
    Symptoms,
    Description,
}

impl SlotName {
    /// Every slot name, used to enumerate dialogue stages.
    pub const ALL: [SlotName; 6] = [
        SlotName::Temperature,
        SlotName::Duration,
        SlotName::Severity,
        SlotName::CoughType,
        SlotName::Symptoms,
        SlotName::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotName::Temperature => "temperature",
            SlotName::Duration => "duration",
            SlotName::Severity => "severity",
            SlotName::CoughType => "cough_type",
            SlotName::Symptoms => "symptoms",
            SlotName::Description => "description",
        }
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a slot, which decides how answers are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// A number must be present in the answer or the question is asked again.
    Numeric,
    /// Any non-blank answer is accepted verbatim.
    Text,
}

/// A filled slot value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SlotValue {
    Number(f64),
    Text(String),
}

impl SlotValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SlotValue::Number(n) => Some(*n),
            SlotValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SlotValue::Text(s) => Some(s),
            SlotValue::Number(_) => None,
        }
    }
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValue::Number(n) => write!(f, "{}", n),
            SlotValue::Text(s) => f.write_str(s),
        }
    }
}

/// Filled slots of the active topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slots(BTreeMap<SlotName, SlotValue>);

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: SlotName, value: SlotValue) {
        self.0.insert(name, value);
    }

    pub fn get(&self, name: SlotName) -> Option<&SlotValue> {
        self.0.get(&name)
    }

    pub fn is_filled(&self, name: SlotName) -> bool {
        self.0.contains_key(&name)
    }

    /// Numeric value of a slot, if filled with a number.
    pub fn number(&self, name: SlotName) -> Option<f64> {
        self.get(name).and_then(SlotValue::as_number)
    }

    /// Lowercased text of a slot, for case-insensitive rule matching.
    pub fn text_lower(&self, name: SlotName) -> Option<String> {
        self.get(name)
            .and_then(SlotValue::as_text)
            .map(str::to_lowercase)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SlotName, &SlotValue)> {
        self.0.iter()
    }
}
