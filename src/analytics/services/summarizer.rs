//! Result summarization stage: tabular evidence in, prose answer out.

use super::prompts::{self, PromptError};
use crate::analytics::domain::{ResultSet, format_sql};
use crate::analytics::ports::{LanguageModel, ModelRequest, ModelUnavailable};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors from the summarization stage.
///
/// Terminal by design: a summarization failure after a successful query
/// execution is never recovered by re-running the query.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SummaryError {
    /// The answer prompt failed to render.
    #[error(transparent)]
    Prompt(#[from] PromptError),
    /// The language-model call failed.
    #[error(transparent)]
    Model(#[from] ModelUnavailable),
}

/// Composes a natural-language answer from a query's tabular result.
#[derive(Clone)]
pub struct ResultSummarizer<L>
where
    L: LanguageModel,
{
    model: Arc<L>,
    model_name: String,
}

impl<L> ResultSummarizer<L>
where
    L: LanguageModel,
{
    /// Creates a summarizer calling the named model.
    #[must_use]
    pub fn new(model: Arc<L>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    /// Summarizes the result set into chat-ready markdown.
    ///
    /// The executed query is canonically reformatted and included in the
    /// prompt so the model can echo it back in the answer.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError`] when the prompt fails to render or the
    /// language-model call fails.
    pub async fn summarize(
        &self,
        question: &str,
        executed_query: &str,
        results: &ResultSet,
    ) -> Result<String, SummaryError> {
        let formatted_query = format_sql(executed_query);
        let prompt = prompts::render_summary_prompt(question, &formatted_query, results)?;
        debug!(
            rows = results.row_count(),
            prompt_len = prompt.len(),
            "requesting answer synthesis"
        );
        Ok(self
            .model
            .generate(&ModelRequest::new(&self.model_name, prompt))
            .await?)
    }
}
