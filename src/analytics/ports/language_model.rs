//! Port for the language-model text-completion service.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Result type for language-model operations.
pub type LanguageModelResult<T> = Result<T, ModelUnavailable>;

/// One text-completion request at the service boundary.
///
/// Plain text in, plain text out; the pipeline uses no structured
/// function-calling contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    model: String,
    prompt: String,
}

impl ModelRequest {
    /// Creates a request for the named model.
    #[must_use]
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
        }
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the prompt text.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// The language-model service could not produce a completion.
///
/// Covers transport failures, error statuses, quota rejections, and
/// malformed responses alike; the caller one layer up decides whether the
/// failure is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("language model unavailable: {0}")]
pub struct ModelUnavailable(pub String);

/// Text-completion contract.
///
/// Implementations must be safe for concurrent use by multiple in-flight
/// pipeline invocations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generates a completion for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ModelUnavailable`] when the service is unreachable,
    /// returns an error status, or responds with no usable text.
    async fn generate(&self, request: &ModelRequest) -> LanguageModelResult<String>;
}
