//! Storage Adapters
//!
//! Implementations of the SessionStore port for persisting intake sessions.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Sessions in memory (default, tests)
//! - **FileSessionStore** - One YAML file per session
//! - **RedisSessionStore** - JSON keys with expiry, shared across instances
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSessionStore, InMemorySessionStore};
//!
//! // Single instance: file-based storage
//! let store = FileSessionStore::new("./data/sessions", 1800);
//!
//! // Testing: in-memory storage
//! let store = InMemorySessionStore::new(1800);
//! ```

mod file_session_store;
mod in_memory_session_store;
mod redis_session_store;

pub use file_session_store::FileSessionStore;
pub use in_memory_session_store::InMemorySessionStore;
pub use redis_session_store::RedisSessionStore;
