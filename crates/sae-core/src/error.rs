use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid step: {0} (expected 1-5)")]
    InvalidStep(u8),

    #[error("expected a JSON object for {0}")]
    NotAnObject(&'static str),
}
