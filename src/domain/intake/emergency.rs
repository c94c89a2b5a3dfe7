//! Emergency keyword detection.
//!
//! The emergency flag of a reply comes only from this scan over the user's
//! input and the generated message, never from slot values.

/// Fixed emergency keyword set, lowercase.
pub const EMERGENCY_KEYWORDS: &[&str] = &[
    "emergency",
    "chest pain",
    "heart attack",
    "can't breathe",
    "cannot breathe",
    "not breathing",
    "unconscious",
    "passed out",
    "seizure",
    "having a stroke",
    "severe bleeding",
    "coughing blood",
    "coughing up blood",
    "vomiting blood",
    "overdose",
    "suicide",
];

/// Keywords found in one scan, in keyword-set order and without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmergencyScan {
    pub matched: Vec<String>,
}

impl EmergencyScan {
    pub fn is_emergency(&self) -> bool {
        !self.matched.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmergencyDetector;

impl EmergencyDetector {
    pub fn new() -> Self {
        Self
    }

    /// Scans every text and reports which keywords appear in any of them.
    pub fn scan(&self, texts: &[&str]) -> EmergencyScan {
        let normalized: Vec<String> = texts.iter().map(|t| normalize(t)).collect();
        let matched = EMERGENCY_KEYWORDS
            .iter()
            .filter(|k| normalized.iter().any(|t| t.contains(*k)))
            .map(|k| k.to_string())
            .collect();
        EmergencyScan { matched }
    }
}

/// Lowercases and folds typographic apostrophes so "can’t" matches "can't".
fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}
