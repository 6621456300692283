//! Error types for the Folio binary.

use folio_core::{ContactError, NavError};
use thiserror::Error;

/// Errors talking to the hosted content backend.
#[derive(Debug, Error)]
pub enum ContentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend returned a non-success status.
    #[error("Server error: {0}")]
    Server(String),

    /// No content project configured.
    #[error("content backend not configured")]
    Unconfigured,
}

/// Top-level error for CLI commands and server startup.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Contact(#[from] ContactError),

    #[error(transparent)]
    Nav(#[from] NavError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
