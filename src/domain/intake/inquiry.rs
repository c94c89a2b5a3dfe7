//! Detection of general health questions ("what is diabetes?").
//!
//! Only consulted for input the topic classifier could not place. The
//! answer comes from a [`KnowledgeSource`](crate::ports::KnowledgeSource).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Conditions the knowledge source can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Diabetes,
    Stroke,
    Cancer,
    Hypertension,
    Arthritis,
    Depression,
}

impl Condition {
    pub const ALL: [Condition; 6] = [
        Condition::Diabetes,
        Condition::Stroke,
        Condition::Cancer,
        Condition::Hypertension,
        Condition::Arthritis,
        Condition::Depression,
    ];

    /// Phrases that name this condition, lowercase.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Condition::Diabetes => &["diabetes", "diabetic", "blood sugar"],
            Condition::Stroke => &["stroke", "brain attack", "cerebrovascular"],
            Condition::Cancer => &["cancer", "tumor", "tumour", "malignant"],
            Condition::Hypertension => &["hypertension", "high blood pressure"],
            Condition::Arthritis => &["arthritis", "joint stiffness"],
            Condition::Depression => &["depression", "depressed", "mental health"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Diabetes => "diabetes",
            Condition::Stroke => "stroke",
            Condition::Cancer => "cancer",
            Condition::Hypertension => "hypertension",
            Condition::Arthritis => "arthritis",
            Condition::Depression => "depression",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user wants to know about a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryKind {
    Overview,
    Symptoms,
    Treatment,
    Prevention,
}

impl InquiryKind {
    pub const ALL: [InquiryKind; 4] = [
        InquiryKind::Overview,
        InquiryKind::Symptoms,
        InquiryKind::Treatment,
        InquiryKind::Prevention,
    ];

    /// Checked in declaration order; overview wins over everything else.
    const CUES: [(InquiryKind, &'static [&'static str]); 4] = [
        (
            InquiryKind::Overview,
            &["what is", "what's", "tell me about", "explain"],
        ),
        (
            InquiryKind::Symptoms,
            &["symptom", "sign", "feel", "warning"],
        ),
        (
            InquiryKind::Treatment,
            &["treatment", "treat", "cure", "medicine", "therapy", "medication"],
        ),
        (
            InquiryKind::Prevention,
            &["prevent", "avoid", "reduce risk", "protection"],
        ),
    ];

    /// Kind of question asked, defaulting to an overview.
    pub fn detect(text: &str) -> Self {
        let lowered = text.to_lowercase();
        Self::CUES
            .iter()
            .find(|(_, cues)| cues.iter().any(|c| lowered.contains(c)))
            .map(|(kind, _)| *kind)
            .unwrap_or(InquiryKind::Overview)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryKind::Overview => "overview",
            InquiryKind::Symptoms => "symptoms",
            InquiryKind::Treatment => "treatment",
            InquiryKind::Prevention => "prevention",
        }
    }
}

impl fmt::Display for InquiryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized knowledge question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KnowledgeQuery {
    pub condition: Condition,
    pub kind: InquiryKind,
}

impl KnowledgeQuery {
    /// Returns a query when the text names a known condition.
    pub fn detect(text: &str) -> Option<Self> {
        let lowered = text.to_lowercase();
        let condition = Condition::ALL
            .iter()
            .copied()
            .find(|c| c.aliases().iter().any(|a| lowered.contains(a)))?;
        Some(Self {
            condition,
            kind: InquiryKind::detect(&lowered),
        })
    }
}

/// Article returned by a knowledge source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeArticle {
    pub condition: Condition,
    pub kind: InquiryKind,
    pub title: String,
    pub body: String,
}

impl KnowledgeArticle {
    /// Chat message for the article.
    pub fn render(&self) -> String {
        format!("{}\n\n{}", self.title, self.body)
    }
}
