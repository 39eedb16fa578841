use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("artifact error: {0}")]
    Artifact(String),

    #[error("payload error: {0}")]
    Payload(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
