//! Error types for provider calls

use thiserror::Error;

/// Errors raised while building, sending or streaming a completion request.
#[derive(Debug, Error)]
pub enum Error {
    /// No usable credential for the named provider
    #[error("Missing API key for provider '{0}'")]
    MissingApiKey(String),

    /// Provider configuration is incomplete or invalid
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// No provider registered under this ID
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error status or error body
    #[error("Provider error: {0}")]
    Provider(String),

    /// The event stream broke or carried unparseable data
    #[error("Stream error: {0}")]
    Stream(String),

    /// The API answered with something we can't interpret
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn provider_error(message: impl Into<String>) -> Self {
        Error::Provider(message.into())
    }

    pub fn stream_error(message: impl Into<String>) -> Self {
        Error::Stream(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Error::InvalidResponse(message.into())
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_message() {
        let err = Error::MissingApiKey("azure".to_string());
        assert_eq!(err.to_string(), "Missing API key for provider 'azure'");
    }

    #[test]
    fn test_helper_constructors() {
        assert!(matches!(Error::provider_error("x"), Error::Provider(_)));
        assert!(matches!(Error::stream_error("x"), Error::Stream(_)));
        assert!(matches!(
            Error::invalid_response("x"),
            Error::InvalidResponse(_)
        ));
        assert_eq!(Error::config_error("no endpoint").to_string(), "Invalid configuration: no endpoint");
    }
}
