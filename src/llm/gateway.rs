use crate::error::Result;
use crate::llm::models::{LlmGatewayResponse, LlmMessage};
use async_trait::async_trait;

/// Optional sampling settings for a completion request.
///
/// Both fields default to `None`, in which case the request body carries only
/// `model` and `messages` and the provider's own defaults apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionConfig {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Abstract interface for chat-completion providers
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the full transcript and return the first reply choice
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_config_default() {
        let config = CompletionConfig::default();

        assert_eq!(config.temperature, None);
        assert_eq!(config.max_tokens, None);
    }

    #[test]
    fn test_completion_config_custom() {
        let config = CompletionConfig {
            temperature: Some(0.5),
            max_tokens: Some(1024),
        };

        assert_eq!(config.temperature, Some(0.5));
        assert_eq!(config.max_tokens, Some(1024));
        assert_ne!(config, CompletionConfig::default());
    }
}
