//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod intake;

pub use intake::{
    // Commands and queries
    GetTranscriptHandler, GetTranscriptQuery,
    HandleMessageCommand, HandleMessageHandler, DEFAULT_MAX_HISTORY_TURNS,
    ResetSessionCommand, ResetSessionHandler, ResetSessionResult,
    // Background work
    SessionLocks, SessionSweeper, SweepReport,
};
