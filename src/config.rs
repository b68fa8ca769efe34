//! Startup configuration.
//!
//! Everything comes from environment variables, which the binary may seed from
//! a `.env` file first. Only the credential is required.
//!
//! | Variable                | Default                          |
//! |-------------------------|----------------------------------|
//! | `GROQ_API_KEY`          | required                         |
//! | `GROQ_API_ENDPOINT`     | `https://api.groq.com/openai/v1` |
//! | `MAILFORM_MODEL`        | `llama3-8b-8192`                 |
//! | `MAILFORM_TIMEOUT_SECS` | no timeout                       |
//! | `MAILFORM_TEMPERATURE`  | provider default                 |

use crate::error::{FormError, Result};
use crate::llm::gateway::CompletionConfig;
use crate::llm::gateways::{OpenAIConfig, DEFAULT_BASE_URL};
use std::str::FromStr;
use std::time::Duration;

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const ENDPOINT_VAR: &str = "GROQ_API_ENDPOINT";
pub const MODEL_VAR: &str = "MAILFORM_MODEL";
pub const TIMEOUT_VAR: &str = "MAILFORM_TIMEOUT_SECS";
pub const TEMPERATURE_VAR: &str = "MAILFORM_TEMPERATURE";

pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

#[derive(Debug, Clone)]
pub struct FormConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Option<Duration>,
    pub temperature: Option<f32>,
}

impl FormConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key =
            get(API_KEY_VAR).ok_or_else(|| FormError::MissingCredential(API_KEY_VAR.to_string()))?;

        let timeout =
            parse_optional::<u64>(TIMEOUT_VAR, get(TIMEOUT_VAR))?.map(Duration::from_secs);
        let temperature = parse_optional::<f32>(TEMPERATURE_VAR, get(TEMPERATURE_VAR))?;

        Ok(Self {
            api_key,
            base_url: get(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
            temperature,
        })
    }

    pub fn gateway_config(&self) -> OpenAIConfig {
        OpenAIConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout,
        }
    }

    pub fn completion_config(&self) -> CompletionConfig {
        CompletionConfig {
            temperature: self.temperature,
            ..Default::default()
        }
    }
}

fn parse_optional<T: FromStr>(key: &str, raw: Option<String>) -> Result<Option<T>> {
    raw.map(|value| {
        value
            .parse::<T>()
            .map_err(|_| FormError::Config(format!("{} has an invalid value: {:?}", key, value)))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_credential() {
        let result = FormConfig::from_lookup(lookup(&[]));
        match result {
            Err(FormError::MissingCredential(var)) => assert_eq!(var, "GROQ_API_KEY"),
            other => panic!("Expected MissingCredential, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let result = FormConfig::from_lookup(lookup(&[("GROQ_API_KEY", "   ")]));
        assert!(matches!(result, Err(FormError::MissingCredential(_))));
    }

    #[test]
    fn test_defaults() {
        let config = FormConfig::from_lookup(lookup(&[("GROQ_API_KEY", "gsk_test")])).unwrap();

        assert_eq!(config.api_key, "gsk_test");
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.model, "llama3-8b-8192");
        assert!(config.timeout.is_none());
        assert!(config.temperature.is_none());
        assert_eq!(config.completion_config(), CompletionConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = FormConfig::from_lookup(lookup(&[
            ("GROQ_API_KEY", "gsk_test"),
            ("GROQ_API_ENDPOINT", "http://localhost:8080/v1"),
            ("MAILFORM_MODEL", "llama-3.1-8b-instant"),
            ("MAILFORM_TIMEOUT_SECS", "30"),
            ("MAILFORM_TEMPERATURE", "0.3"),
        ]))
        .unwrap();

        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.temperature, Some(0.3));

        let gateway = config.gateway_config();
        assert_eq!(gateway.base_url, "http://localhost:8080/v1");
        assert_eq!(gateway.api_key, "gsk_test");
        assert_eq!(gateway.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_invalid_timeout() {
        let result = FormConfig::from_lookup(lookup(&[
            ("GROQ_API_KEY", "gsk_test"),
            ("MAILFORM_TIMEOUT_SECS", "soon"),
        ]));
        match result {
            Err(FormError::Config(msg)) => assert!(msg.contains("MAILFORM_TIMEOUT_SECS")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
