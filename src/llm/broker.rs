use crate::error::Result;
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::{LlmMessage, MessageRole};
use std::sync::Arc;
use tracing::{info, warn};

/// Binds a gateway to one model and one set of completion settings.
///
/// This is the completion client the conversation shell talks to: hand it the
/// whole transcript, get back exactly one assistant message.
pub struct LlmBroker {
    model: String,
    gateway: Arc<dyn LlmGateway>,
    config: CompletionConfig,
}

impl LlmBroker {
    /// Create a new LLM broker
    pub fn new(model: impl Into<String>, gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            model: model.into(),
            gateway,
            config: CompletionConfig::default(),
        }
    }

    /// Replace the completion settings sent with every request
    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate the next reply for the given transcript.
    ///
    /// The reply is always returned as an assistant message, whatever role the
    /// provider echoed back.
    pub async fn generate(&self, messages: &[LlmMessage]) -> Result<LlmMessage> {
        info!(model = %self.model, messages = messages.len(), "Generating reply");

        let response = self.gateway.complete(&self.model, messages, &self.config).await?;

        if response.role != MessageRole::Assistant {
            warn!(role = ?response.role, "Provider replied with a non-assistant role");
        }

        Ok(LlmMessage::assistant(response.content))
    }
}
