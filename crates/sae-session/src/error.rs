use thiserror::Error;

use crate::failure::SaveFailure;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("patient not found: {0}")]
    PatientNotFound(String),

    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{}", .0.error)]
    Persistence(SaveFailure),

    #[error("assessment already submitted as {0}")]
    AlreadySubmitted(String),

    #[error(transparent)]
    Core(#[from] sae_core::error::CoreError),
}
