//! REST adapters for the production language-model and warehouse services.

mod language_model;
mod warehouse;

pub use language_model::{GeminiConfig, GeminiLanguageModel};
pub use warehouse::{BigQueryConfig, BigQueryWarehouse};

use thiserror::Error;

/// Errors while assembling an HTTP adapter from its configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdapterConfigError {
    /// A required environment variable is unset or unreadable.
    #[error("missing required environment variable: {0}")]
    MissingVariable(&'static str),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Reads a required environment variable, loading `.env` first.
fn required_env(name: &'static str) -> Result<String, AdapterConfigError> {
    dotenvy::dotenv().ok();
    std::env::var(name).map_err(|_| AdapterConfigError::MissingVariable(name))
}

/// Reads an optional environment variable, loading `.env` first.
fn optional_env(name: &str) -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(name).ok()
}
