//! Terminal pipeline output.

use serde::{Deserialize, Serialize};

/// Final answer handed back to the chat surface.
///
/// Every pipeline invocation terminates in a well-formed answer; failures
/// surface as `succeeded = false` with user-facing text, never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    text: String,
    succeeded: bool,
}

impl AnswerResult {
    /// Creates a successful answer carrying the summarizer's text.
    #[must_use]
    pub fn answered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            succeeded: true,
        }
    }

    /// Creates a failure answer carrying user-facing fallback text.
    #[must_use]
    pub fn failed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            succeeded: false,
        }
    }

    /// Returns the answer text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the pipeline produced a real answer.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.succeeded
    }
}
