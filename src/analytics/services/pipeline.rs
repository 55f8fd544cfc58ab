//! Retry orchestrator binding synthesis, execution, and summarization.

use super::executor::QueryExecutor;
use super::summarizer::ResultSummarizer;
use super::synthesizer::QuerySynthesizer;
use crate::analytics::domain::{
    AnswerResult, CandidateQuery, ExecutionOutcome, InvocationId, QueryRequest, ResultSet,
    RetryState,
};
use crate::analytics::ports::{LanguageModel, Warehouse};
use std::sync::Arc;
use tracing::{info, warn};

/// Default synthesize-and-execute attempt budget per question.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Fixed answer emitted when the retry budget is exhausted.
pub const FALLBACK_ANSWER: &str = "I'm sorry, I wasn't able to find an answer to that question \
     in the sales data. Could you try rephrasing it?";

/// Fixed answer emitted when summarization fails after a successful query.
pub const SUMMARY_FAILURE_ANSWER: &str = "I ran a query for your question but couldn't put the \
     results into words just now. Please try asking again.";

/// Orchestrator state for one invocation.
///
/// The failure back-edge from `Executing` to `Synthesizing` is guarded by
/// the retry budget; a synthesis failure takes the same edge without ever
/// reaching `Executing`.
enum PipelineState {
    Synthesizing,
    Executing {
        candidate: CandidateQuery,
    },
    Summarizing {
        executed_query: String,
        results: ResultSet,
    },
    Done {
        answer: AnswerResult,
    },
}

/// The translate-execute-summarize pipeline with bounded retry.
///
/// Stateless across invocations: every question runs the state machine
/// `Synthesizing -> Executing -> Summarizing -> Done` with stack-local
/// retry state, so one pipeline value serves concurrent questions.
#[derive(Clone)]
pub struct AnswerPipeline<L, W>
where
    L: LanguageModel,
    W: Warehouse,
{
    synthesizer: QuerySynthesizer<L>,
    executor: QueryExecutor<W>,
    summarizer: ResultSummarizer<L>,
    max_attempts: u32,
}

impl<L, W> AnswerPipeline<L, W>
where
    L: LanguageModel,
    W: Warehouse,
{
    /// Creates a pipeline over the given clients with the default budget.
    #[must_use]
    pub fn new(model: Arc<L>, warehouse: Arc<W>, model_name: impl Into<String>) -> Self {
        let name = model_name.into();
        Self {
            synthesizer: QuerySynthesizer::new(Arc::clone(&model), name.clone()),
            executor: QueryExecutor::new(warehouse),
            summarizer: ResultSummarizer::new(model, name),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the attempt budget. Zero is treated as one.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Answers one question, terminating in a well-formed answer.
    ///
    /// No failure surfaces as an error: execution and synthesis failures
    /// are retried up to the budget and then fold into the fixed fallback
    /// answer, and a summarization failure folds into a generic failure
    /// answer.
    #[expect(
        clippy::needless_pass_by_value,
        reason = "each invocation consumes its request; callers keep no alias"
    )]
    pub async fn answer(&self, request: QueryRequest) -> AnswerResult {
        let invocation = InvocationId::new();
        let mut retry = RetryState::new(self.max_attempts);
        info!(
            %invocation,
            question = request.question(),
            max_attempts = retry.max_attempts(),
            "answering question"
        );

        let mut state = PipelineState::Synthesizing;
        loop {
            state = match state {
                PipelineState::Synthesizing => {
                    self.synthesize_step(invocation, &request, &mut retry).await
                }
                PipelineState::Executing { candidate } => {
                    self.execute_step(invocation, &candidate, &mut retry).await
                }
                PipelineState::Summarizing {
                    executed_query,
                    results,
                } => {
                    self.summarize_step(invocation, &request, &executed_query, &results)
                        .await
                }
                PipelineState::Done { answer } => {
                    info!(%invocation, succeeded = answer.succeeded(), "pipeline finished");
                    return answer;
                }
            };
        }
    }

    async fn synthesize_step(
        &self,
        invocation: InvocationId,
        request: &QueryRequest,
        retry: &mut RetryState,
    ) -> PipelineState {
        info!(
            %invocation,
            attempt = retry.attempts_used().saturating_add(1),
            max_attempts = retry.max_attempts(),
            "synthesizing candidate query"
        );
        match self
            .synthesizer
            .synthesize(request, retry.attempts_used())
            .await
        {
            Ok(candidate) => PipelineState::Executing { candidate },
            Err(error) => {
                warn!(%invocation, %error, "query synthesis failed");
                after_failed_attempt(retry, error.to_string())
            }
        }
    }

    async fn execute_step(
        &self,
        invocation: InvocationId,
        candidate: &CandidateQuery,
        retry: &mut RetryState,
    ) -> PipelineState {
        match self.executor.execute(candidate).await {
            ExecutionOutcome::Success { results } => PipelineState::Summarizing {
                executed_query: candidate.sanitized(),
                results,
            },
            ExecutionOutcome::Failure { error_detail } => {
                warn!(
                    %invocation,
                    attempt = retry.attempts_used().saturating_add(1),
                    max_attempts = retry.max_attempts(),
                    error = %error_detail,
                    "query execution failed"
                );
                after_failed_attempt(retry, error_detail)
            }
        }
    }

    async fn summarize_step(
        &self,
        invocation: InvocationId,
        request: &QueryRequest,
        executed_query: &str,
        results: &ResultSet,
    ) -> PipelineState {
        match self
            .summarizer
            .summarize(request.question(), executed_query, results)
            .await
        {
            Ok(text) => PipelineState::Done {
                answer: AnswerResult::answered(text),
            },
            Err(error) => {
                warn!(%invocation, %error, "result summarization failed");
                PipelineState::Done {
                    answer: AnswerResult::failed(SUMMARY_FAILURE_ANSWER),
                }
            }
        }
    }
}

/// Records a failed attempt and decides between re-synthesis and fallback.
///
/// Re-synthesis is stateless: the next attempt re-renders the same prompt
/// from the same request. The recorded error is logged but never fed back
/// into the prompt.
fn after_failed_attempt(retry: &mut RetryState, error_detail: String) -> PipelineState {
    retry.record_failure(error_detail);
    if retry.exhausted() {
        info!(
            attempts = retry.attempts_used(),
            "retry budget exhausted, returning fallback answer"
        );
        PipelineState::Done {
            answer: AnswerResult::failed(FALLBACK_ANSWER),
        }
    } else {
        PipelineState::Synthesizing
    }
}
