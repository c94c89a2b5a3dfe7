//! Knowledge source implementations.

mod static_knowledge;

pub use static_knowledge::StaticKnowledgeBase;
