//! Runtime error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The completion stream failed before finishing; the turn was dropped.
    #[error("Streaming failed: {0}")]
    StreamingTransport(String),

    /// The provider could not be built or refused the request outright.
    #[error("LLM error: {0}")]
    LlmFailed(String),

    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
