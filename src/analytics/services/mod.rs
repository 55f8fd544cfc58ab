//! Pipeline stage services and the retry orchestrator.

mod executor;
mod pipeline;
pub(crate) mod prompts;
mod summarizer;
mod synthesizer;

pub use executor::QueryExecutor;
pub use pipeline::{AnswerPipeline, DEFAULT_MAX_ATTEMPTS, FALLBACK_ANSWER, SUMMARY_FAILURE_ANSWER};
pub use prompts::PromptError;
pub use summarizer::{ResultSummarizer, SummaryError};
pub use synthesizer::{QuerySynthesizer, SynthesisError};
