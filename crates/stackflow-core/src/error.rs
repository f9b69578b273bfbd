//! Orchestration error types

use crate::output::OutputError;
use thiserror::Error;

/// Errors raised while declaring or running a resource graph
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Resource already exists: {0}")]
    ResourceAlreadyExists(String),

    #[error("Resource registration failed for {urn}: {message}")]
    Registration { urn: String, message: String },

    #[error("Provider call failed: {0}")]
    ApiError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Context is closed; resources can no longer be registered")]
    ContextClosed,

    #[error("Context state is poisoned")]
    Poisoned,

    #[error("Registration task failed: {0}")]
    TaskFailed(String),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
