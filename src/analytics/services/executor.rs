//! Query execution stage: candidate SQL in, normalized outcome out.

use crate::analytics::domain::{CandidateQuery, ExecutionOutcome};
use crate::analytics::ports::Warehouse;
use std::sync::Arc;
use tracing::{debug, warn};

/// Submits candidate queries to the warehouse and normalizes the result.
///
/// Every warehouse-side failure comes back as
/// [`ExecutionOutcome::Failure`]; nothing raises past this boundary, so the
/// orchestrator treats all execution failures uniformly.
#[derive(Clone)]
pub struct QueryExecutor<W>
where
    W: Warehouse,
{
    warehouse: Arc<W>,
}

impl<W> QueryExecutor<W>
where
    W: Warehouse,
{
    /// Creates an executor over the given warehouse.
    #[must_use]
    pub const fn new(warehouse: Arc<W>) -> Self {
        Self { warehouse }
    }

    /// Runs one candidate query, stripping code fences first.
    pub async fn execute(&self, candidate: &CandidateQuery) -> ExecutionOutcome {
        let sql = candidate.sanitized();
        debug!(
            attempt_number = candidate.attempt_number(),
            sql_len = sql.len(),
            "submitting query job"
        );
        match self.warehouse.run_query(&sql).await {
            Ok(results) => {
                debug!(rows = results.row_count(), "query job completed");
                ExecutionOutcome::Success { results }
            }
            Err(error) => {
                warn!(%error, "query job failed");
                ExecutionOutcome::Failure {
                    error_detail: error.to_string(),
                }
            }
        }
    }
}
