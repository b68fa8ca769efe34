//! Gateway for OpenAI-compatible chat-completion APIs.
//!
//! Groq, OpenAI and most self-hosted servers expose the same
//! `POST {base_url}/chat/completions` contract, so a single gateway covers them.
//! The default base URL points at Groq.

use crate::error::{FormError, Result};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::{LlmGatewayResponse, LlmMessage, MessageRole};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Configuration for connecting to an OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Gateway for OpenAI-compatible LLM services.
pub struct OpenAIGateway {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIGateway {
    /// Create a new gateway with custom configuration.
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;

        Ok(Self { client, config })
    }

    /// Create gateway with custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(OpenAIConfig {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout: None,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn build_body(model: &str, messages: &[LlmMessage], config: &CompletionConfig) -> Result<Value> {
        let mut body = serde_json::json!({
            "model": model,
            "messages": serde_json::to_value(messages)?,
        });

        if let Some(temperature) = config.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }
        if let Some(max_tokens) = config.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        Ok(body)
    }
}

/// Pull the first choice's message out of a chat-completion response body.
fn parse_reply(response_body: &Value) -> Result<LlmGatewayResponse> {
    let message = response_body["choices"]
        .get(0)
        .map(|choice| &choice["message"])
        .filter(|message| message.is_object())
        .ok_or_else(|| FormError::MalformedResponse("response has no choices".to_string()))?;

    let content = message["content"]
        .as_str()
        .ok_or_else(|| FormError::MalformedResponse("first choice has no content".to_string()))?;

    let role = match message.get("role") {
        Some(role) => serde_json::from_value(role.clone()).unwrap_or_else(|_| {
            warn!(role = %role, "Unexpected reply role, treating it as assistant");
            MessageRole::Assistant
        }),
        None => MessageRole::Assistant,
    };

    Ok(LlmGatewayResponse {
        role,
        content: content.to_string(),
    })
}

#[async_trait]
impl LlmGateway for OpenAIGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse> {
        info!("Requesting chat completion");
        debug!("Model: {}, Message count: {}", model, messages.len());

        let body = Self::build_body(model, messages, config)?;

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Chat completion request rejected");
            return Err(FormError::RemoteCompletion {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let response_body: Value = response.json().await?;
        let reply = parse_reply(&response_body)?;

        debug!(reply_len = reply.content.len(), "Chat completion received");

        Ok(reply)
    }
}
