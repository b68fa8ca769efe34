pub mod controller;
pub mod markers;
pub mod prompt;
pub mod session;

pub use controller::{ConversationController, NextAction};
pub use markers::CompletionMarkers;
pub use prompt::SYSTEM_PROMPT;
pub use session::{Phase, SessionState};
