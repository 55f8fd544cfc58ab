//! Queue-scripted warehouse for tests.

use crate::analytics::domain::ResultSet;
use crate::analytics::ports::{Warehouse, WarehouseError, WarehouseResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Thread-safe warehouse that replays a scripted outcome queue.
///
/// Each call pops the next scripted result (or error) and records the SQL
/// text it received, so tests can assert on exactly what reached the
/// warehouse boundary. An empty queue yields [`WarehouseError::Request`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedWarehouse {
    state: Arc<Mutex<ScriptedWarehouseState>>,
}

#[derive(Debug, Default)]
struct ScriptedWarehouseState {
    outcomes: VecDeque<WarehouseResult<ResultSet>>,
    received: Vec<String>,
}

impl ScriptedWarehouse {
    /// Creates a warehouse with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful result set.
    pub fn enqueue_results(&self, results: ResultSet) {
        if let Ok(mut state) = self.state.lock() {
            state.outcomes.push_back(Ok(results));
        }
    }

    /// Queues a structured execution error.
    pub fn enqueue_error(&self, error: WarehouseError) {
        if let Ok(mut state) = self.state.lock() {
            state.outcomes.push_back(Err(error));
        }
    }

    /// Returns every SQL text received so far, in call order.
    #[must_use]
    pub fn received(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.received.clone())
            .unwrap_or_default()
    }

    /// Returns the number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state
            .lock()
            .map(|state| state.received.len())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Warehouse for ScriptedWarehouse {
    async fn run_query(&self, sql: &str) -> WarehouseResult<ResultSet> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| WarehouseError::Request(err.to_string()))?;
        state.received.push(sql.to_owned());
        state
            .outcomes
            .pop_front()
            .unwrap_or_else(|| Err(WarehouseError::Request("no scripted outcome queued".to_owned())))
    }
}
