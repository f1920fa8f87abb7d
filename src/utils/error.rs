// src/utils/error.rs
use std::time::Duration;
use thiserror::Error;

use crate::api::error::ApiError;
use crate::core::identity::biometric::BiometricError;
use crate::core::identity::types::ValidationError;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid enrollment request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Face sample error: {0}")]
    Biometric(#[from] BiometricError),

    #[error("Enrollment API error: {0}")]
    Api(#[from] ApiError),

    #[error("Enrollment timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, NodeError>;
