//! Emergency notifier implementations.

mod in_memory;
mod tracing_notifier;

pub use in_memory::InMemoryEmergencyNotifier;
pub use tracing_notifier::TracingEmergencyNotifier;
