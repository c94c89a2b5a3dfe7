//! Knowledge Source Port - Articles for general health questions.
//!
//! Consulted only for input the topic classifier could not place.

use async_trait::async_trait;

use crate::domain::intake::{KnowledgeArticle, KnowledgeQuery};

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("Knowledge source unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Look up an article
    ///
    /// # Returns
    /// `None` when the source has nothing for this condition and kind
    async fn lookup(&self, query: &KnowledgeQuery) -> Result<Option<KnowledgeArticle>, KnowledgeError>;
}
