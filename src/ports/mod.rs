//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `SessionStore` - Intake session persistence with idle-timeout eviction
//!
//! ## Outbound Ports
//!
//! - `TranscriptSink` - Copy of every chat turn
//! - `EmergencyNotifier` - Alert raised for emergency-flagged replies
//! - `KnowledgeSource` - Articles for general health questions

mod emergency_notifier;
mod knowledge_source;
mod session_store;
mod transcript_sink;

pub use emergency_notifier::{EmergencyAlert, EmergencyNotifier, NotifyError};
pub use knowledge_source::{KnowledgeError, KnowledgeSource};
pub use session_store::{SessionStore, SessionStoreError};
pub use transcript_sink::{TranscriptEntry, TranscriptError, TranscriptSink};
