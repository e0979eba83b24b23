//! Resource graph and backend error types

use thiserror::Error;

/// Errors raised while assembling a resource graph or handing it to a backend
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Duplicate resource in graph: {0}")]
    DuplicateResource(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
