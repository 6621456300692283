//! # Folio Library
//!
//! This library exposes the Folio modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod config;
pub mod content_client;
pub mod error;
pub mod mailer;

pub use error::{ContentError, FolioError};

// Re-export folio_core for convenience
pub use folio_core;
