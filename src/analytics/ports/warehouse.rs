//! Port for the columnar warehouse query engine.

use crate::analytics::domain::ResultSet;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Result type for warehouse operations.
pub type WarehouseResult<T> = Result<T, WarehouseError>;

/// Structured execution errors at the warehouse boundary.
///
/// The executor normalizes every variant into a uniform failure outcome;
/// the structure exists so adapters can log and map causes faithfully.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WarehouseError {
    /// The warehouse rejected the query as unparseable or invalid.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The caller lacks permission on the table or dataset.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The query did not complete within the warehouse's deadline.
    #[error("query timed out: {0}")]
    TimedOut(String),

    /// Transport-level or otherwise uncategorized failure.
    #[error("warehouse request failed: {0}")]
    Request(String),
}

/// Query-execution contract.
///
/// Takes already-sanitized query text (code fences removed) and blocks
/// until the job completes or fails. Implementations must be safe for
/// concurrent use by multiple in-flight pipeline invocations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Runs a query job and materializes its result set.
    ///
    /// # Errors
    ///
    /// Returns a [`WarehouseError`] describing why the job was rejected or
    /// could not complete.
    async fn run_query(&self, sql: &str) -> WarehouseResult<ResultSet>;
}
