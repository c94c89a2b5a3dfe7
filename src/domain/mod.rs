//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `intake` - Symptom intake dialogue: topics, slots, sessions and the dialogue engine

pub mod foundation;
pub mod intake;
