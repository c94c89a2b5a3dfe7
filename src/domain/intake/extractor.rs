//! Slot value extraction from free-text answers.

use once_cell::sync::Lazy;
use regex::Regex;

use super::catalog::SlotSpec;
use super::slot::{SlotKind, SlotName, SlotValue};
use super::topic::Topic;

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(\.\d+)?").expect("valid regex"));

/// Temperatures above this are read as Fahrenheit.
pub const FAHRENHEIT_THRESHOLD: f64 = 45.0;

/// Result of reading an answer for an open slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Value(SlotValue),
    Unrecognized,
}

/// Returns the first integer or decimal number in `text`.
pub fn first_number(text: &str) -> Option<f64> {
    NUMBER
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Pulls typed slot values out of user answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotExtractor;

impl SlotExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, topic: Topic, slot: &SlotSpec, text: &str) -> Extraction {
        let extraction = match slot.kind {
            SlotKind::Numeric => match first_number(text) {
                Some(n) if slot.name == SlotName::Temperature => {
                    Extraction::Value(SlotValue::Number(normalize_temperature(n)))
                }
                Some(n) => Extraction::Value(SlotValue::Number(n)),
                None => Extraction::Unrecognized,
            },
            SlotKind::Text => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Extraction::Unrecognized
                } else {
                    Extraction::Value(SlotValue::Text(trimmed.to_string()))
                }
            }
        };

        tracing::debug!(
            topic = %topic,
            slot = %slot.name,
            recognized = matches!(extraction, Extraction::Value(_)),
            "Slot extraction"
        );

        extraction
    }
}

/// Converts Fahrenheit readings to Celsius, rounded to one decimal.
fn normalize_temperature(value: f64) -> f64 {
    if value > FAHRENHEIT_THRESHOLD {
        ((value - 32.0) * 5.0 / 9.0 * 10.0).round() / 10.0
    } else {
        value
    }
}
