//! Retry bookkeeping for one pipeline invocation.

/// Budget-bounded retry counter owned by the orchestrator.
///
/// One attempt covers a full synthesize-and-execute round trip; synthesis
/// failures and execution failures draw from the same budget. The state
/// lives on the stack of a single invocation and is discarded on
/// completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryState {
    attempts_used: u32,
    max_attempts: u32,
    last_error: Option<String>,
}

impl RetryState {
    /// Creates retry state with the given budget.
    ///
    /// A budget of zero is treated as one attempt so the pipeline always
    /// makes at least one round trip.
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempts_used: 0,
            max_attempts: max_attempts.max(1),
            last_error: None,
        }
    }

    /// Returns the number of failed attempts so far.
    #[must_use]
    pub const fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// Returns the configured budget.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the most recent failure detail, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Records a failed attempt and its error detail.
    pub fn record_failure(&mut self, error_detail: impl Into<String>) {
        self.attempts_used = self.attempts_used.saturating_add(1);
        self.last_error = Some(error_detail.into());
    }

    /// Returns whether the budget is spent.
    #[must_use]
    pub const fn exhausted(&self) -> bool {
        self.attempts_used >= self.max_attempts
    }
}
