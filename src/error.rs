//! Error types and result aliases for mailform.
//!
//! This module defines the core error type [`FormError`] and the [`Result`] type alias
//! used throughout the crate. Startup failures (a missing credential, a bad setting)
//! and per-turn failures (a rejected completion request) share this one enum so the
//! shell can decide how to surface each of them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Missing credential: {0} is not set (export it or add it to a .env file)")]
    MissingCredential(String),

    #[error("API request failed with status code {status}: {body}")]
    RemoteCompletion { status: u16, body: String },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormError {
    /// Whether the shell should stop the program rather than let the user retry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FormError::MissingCredential(_) | FormError::Config(_) | FormError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_display() {
        let err = FormError::MissingCredential("GROQ_API_KEY".to_string());
        assert!(err.to_string().contains("GROQ_API_KEY is not set"));
    }

    #[test]
    fn test_remote_completion_display() {
        let err = FormError::RemoteCompletion {
            status: 500,
            body: "upstream exploded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API request failed with status code 500: upstream exploded"
        );
    }

    #[test]
    fn test_malformed_response_display() {
        let err = FormError::MalformedResponse("no choices".to_string());
        assert_eq!(err.to_string(), "Malformed completion response: no choices");
    }

    #[test]
    fn test_config_error_display() {
        let err = FormError::Config("MAILFORM_TIMEOUT_SECS must be a number".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: MAILFORM_TIMEOUT_SECS must be a number"
        );
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: FormError = json_err.into();

        match err {
            FormError::Serialization(_) => {}
            _ => panic!("Expected Serialization"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err: FormError = io_err.into();

        match err {
            FormError::Io(_) => {}
            _ => panic!("Expected Io"),
        }
    }

    #[test]
    fn test_fatal_classification() {
        assert!(FormError::MissingCredential("GROQ_API_KEY".to_string()).is_fatal());
        assert!(FormError::Config("bad".to_string()).is_fatal());
        assert!(!FormError::RemoteCompletion {
            status: 429,
            body: String::new()
        }
        .is_fatal());
        assert!(!FormError::MalformedResponse("empty".to_string()).is_fatal());
    }
}
