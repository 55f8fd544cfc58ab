//! Query synthesis stage: question plus schema in, candidate SQL out.

use super::prompts::{self, PromptError};
use crate::analytics::domain::{CandidateQuery, QueryRequest};
use crate::analytics::ports::{LanguageModel, ModelRequest, ModelUnavailable};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors from one synthesis attempt.
///
/// Not retried locally; the orchestrator owns the retry policy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SynthesisError {
    /// The synthesis prompt failed to render.
    #[error(transparent)]
    Prompt(#[from] PromptError),
    /// The language-model call failed.
    #[error(transparent)]
    Model(#[from] ModelUnavailable),
}

/// Turns a natural-language question into a candidate query string.
#[derive(Clone)]
pub struct QuerySynthesizer<L>
where
    L: LanguageModel,
{
    model: Arc<L>,
    model_name: String,
}

impl<L> QuerySynthesizer<L>
where
    L: LanguageModel,
{
    /// Creates a synthesizer calling the named model.
    #[must_use]
    pub fn new(model: Arc<L>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    /// Synthesizes a candidate query for the request.
    ///
    /// Returns the model's raw output, not yet sanitized; the executor
    /// strips code fences before submission.
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError`] when the prompt fails to render or the
    /// language-model call fails.
    pub async fn synthesize(
        &self,
        request: &QueryRequest,
        attempt_number: u32,
    ) -> Result<CandidateQuery, SynthesisError> {
        let prompt = prompts::render_synthesis_prompt(request)?;
        debug!(
            attempt_number,
            prompt_len = prompt.len(),
            "requesting query synthesis"
        );
        let raw = self
            .model
            .generate(&ModelRequest::new(&self.model_name, prompt))
            .await?;
        Ok(CandidateQuery::new(raw, attempt_number))
    }
}
