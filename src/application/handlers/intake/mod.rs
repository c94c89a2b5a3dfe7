//! Intake handlers - chat turns, resets, transcripts and session eviction.

mod get_transcript;
mod handle_message;
mod reset_session;
mod session_locks;
mod sweep_sessions;

pub use get_transcript::{GetTranscriptHandler, GetTranscriptQuery};
pub use handle_message::{HandleMessageCommand, HandleMessageHandler, DEFAULT_MAX_HISTORY_TURNS};
pub use reset_session::{ResetSessionCommand, ResetSessionHandler, ResetSessionResult};
pub use session_locks::SessionLocks;
pub use sweep_sessions::{SessionSweeper, SweepReport};
