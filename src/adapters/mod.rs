//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Session stores (in-memory, YAML files, Redis)
//! - `transcript` - Transcript sinks (in-memory, tracing)
//! - `alerts` - Emergency notifiers (in-memory, tracing)
//! - `knowledge` - Built-in condition summaries
//! - `http` - REST API

pub mod alerts;
pub mod http;
pub mod knowledge;
pub mod storage;
pub mod transcript;

pub use alerts::{InMemoryEmergencyNotifier, TracingEmergencyNotifier};
pub use knowledge::StaticKnowledgeBase;
pub use storage::{FileSessionStore, InMemorySessionStore, RedisSessionStore};
pub use transcript::{InMemoryTranscriptSink, TracingTranscriptSink};
