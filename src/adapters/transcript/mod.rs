//! Transcript sink implementations.

mod in_memory;
mod tracing_sink;

pub use in_memory::InMemoryTranscriptSink;
pub use tracing_sink::TracingTranscriptSink;
