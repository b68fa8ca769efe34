pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod shell;

pub use error::{FormError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::FormConfig;
    pub use crate::conversation::{CompletionMarkers, ConversationController, NextAction, Phase};
    pub use crate::error::{FormError, Result};
    pub use crate::llm::gateways::OpenAIGateway;
    pub use crate::llm::{CompletionConfig, LlmBroker, LlmGateway, LlmMessage, MessageRole};
    pub use crate::shell::FormShell;
}
