//! Queue-scripted language model for tests.

use crate::analytics::ports::{LanguageModel, LanguageModelResult, ModelRequest, ModelUnavailable};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Thread-safe language model that replays a scripted reply queue.
///
/// Each call pops the next scripted reply (or error) and records the
/// request it received; an empty queue yields [`ModelUnavailable`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedLanguageModel {
    state: Arc<Mutex<ScriptedModelState>>,
}

#[derive(Debug, Default)]
struct ScriptedModelState {
    replies: VecDeque<LanguageModelResult<String>>,
    requests: Vec<ModelRequest>,
}

impl ScriptedLanguageModel {
    /// Creates a model with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful completion.
    pub fn enqueue_reply(&self, text: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.replies.push_back(Ok(text.into()));
        }
    }

    /// Queues a service failure.
    pub fn enqueue_error(&self, detail: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.replies.push_back(Err(ModelUnavailable(detail.into())));
        }
    }

    /// Returns every request received so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.state
            .lock()
            .map(|state| state.requests.clone())
            .unwrap_or_default()
    }

    /// Returns the number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state
            .lock()
            .map(|state| state.requests.len())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LanguageModel for ScriptedLanguageModel {
    async fn generate(&self, request: &ModelRequest) -> LanguageModelResult<String> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| ModelUnavailable(err.to_string()))?;
        state.requests.push(request.clone());
        state
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(ModelUnavailable("no scripted reply queued".to_owned())))
    }
}
