//! Supported conversational topics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A symptom topic the intake dialogue knows how to walk through.
///
/// The set is closed: every topic must have a definition in the
/// [`TopicCatalog`](super::TopicCatalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    Fever,
    Headache,
    Cough,
    Cold,
    Stomach,
    ChestPain,
    Breathing,
    Pain,
}

impl Topic {
    /// All topics, in standard classifier order.
    pub const ALL: [Topic; 8] = [
        Topic::Fever,
        Topic::Headache,
        Topic::Cough,
        Topic::Cold,
        Topic::Stomach,
        Topic::ChestPain,
        Topic::Breathing,
        Topic::Pain,
    ];

    /// Wire tag used in replies, logs and persisted sessions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Fever => "fever",
            Topic::Headache => "headache",
            Topic::Cough => "cough",
            Topic::Cold => "cold",
            Topic::Stomach => "stomach",
            Topic::ChestPain => "chest-pain",
            Topic::Breathing => "breathing",
            Topic::Pain => "pain",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown topic: {}", s))
    }
}

/// Outcome of running the classifier over a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Topic(Topic),
    Unclassified,
}

impl Classification {
    /// Returns the matched topic, if any.
    pub fn topic(&self) -> Option<Topic> {
        match self {
            Classification::Topic(t) => Some(*t),
            Classification::Unclassified => None,
        }
    }
}
