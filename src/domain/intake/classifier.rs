//! Keyword topic classifier.

use super::catalog::TopicCatalog;
use super::topic::{Classification, Topic};

/// Maps free text to a topic by case-insensitive substring matching.
///
/// The table is ordered and the first topic with a matching keyword wins,
/// so "chest pain" must be listed before the generic "pain" entry.
#[derive(Debug, Clone)]
pub struct TopicClassifier {
    table: Vec<(Topic, Vec<String>)>,
}

impl TopicClassifier {
    /// Creates a classifier from an ordered `(topic, keywords)` table.
    ///
    /// Keywords are lowercased once here.
    pub fn new(table: Vec<(Topic, Vec<String>)>) -> Self {
        let table = table
            .into_iter()
            .map(|(topic, keywords)| {
                let keywords = keywords
                    .into_iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (topic, keywords)
            })
            .collect();
        Self { table }
    }

    /// Builds the classifier from the keywords declared by each definition,
    /// preserving catalog order.
    pub fn from_catalog(catalog: &TopicCatalog) -> Self {
        Self::new(
            catalog
                .definitions()
                .iter()
                .map(|d| (d.topic, d.keywords.clone()))
                .collect(),
        )
    }

    pub fn classify(&self, text: &str) -> Classification {
        let lowered = text.to_lowercase();
        self.table
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k.as_str())))
            .map(|(topic, _)| Classification::Topic(*topic))
            .unwrap_or(Classification::Unclassified)
    }

    /// Topics this classifier can produce, in table order.
    pub fn topics(&self) -> impl Iterator<Item = Topic> + '_ {
        self.table.iter().map(|(topic, _)| *topic)
    }
}

impl Default for TopicClassifier {
    fn default() -> Self {
        Self::from_catalog(&TopicCatalog::standard())
    }
}
