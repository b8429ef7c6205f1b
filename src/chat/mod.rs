//! Conversational interface over a finished search

pub mod fallback;
pub mod interpreter;
pub mod session;
pub mod transcript;

pub use interpreter::{CommandResult, HELP_TEXT, interpret, is_help};
pub use session::{ChatSession, GREETING};
pub use transcript::{Role, Transcript, TranscriptEntry};
