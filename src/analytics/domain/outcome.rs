//! Execution outcomes and the tabular result set.

use super::AnalyticsDomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered tabular result of a warehouse query.
///
/// Columns keep the order the warehouse returned them in; each row holds
/// one cell per column. The executor enforces no upper bound on row count,
/// so consumers must treat the size defensively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ResultSet {
    /// Creates a result set from named columns and ordered rows.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsDomainError::RowWidthMismatch`] when any row's
    /// cell count differs from the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, AnalyticsDomainError> {
        for row in &rows {
            if row.len() != columns.len() {
                return Err(AnalyticsDomainError::RowWidthMismatch {
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Creates an empty result set with the given columns.
    #[must_use]
    pub const fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Returns the column names in warehouse order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows in warehouse order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the result set holds no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the result set as a markdown table for the answer prompt
    /// and the chat surface.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push('|');
        for column in &self.columns {
            out.push(' ');
            out.push_str(&escape_cell(column));
            out.push_str(" |");
        }
        out.push_str("\n|");
        for _ in &self.columns {
            out.push_str(" --- |");
        }
        for row in &self.rows {
            out.push_str("\n|");
            for cell in row {
                out.push(' ');
                out.push_str(&escape_cell(&render_cell(cell)));
                out.push_str(" |");
            }
        }
        out
    }
}

/// Renders one cell value as plain text.
fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Escapes pipe characters so cell text cannot break the table layout.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Result of submitting one candidate query to the warehouse.
///
/// Every warehouse-side failure is normalized into [`Self::Failure`] so the
/// retry orchestrator treats all causes uniformly. Consumed immediately,
/// never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The query ran and its rows were materialized.
    Success {
        /// The materialized tabular result.
        results: ResultSet,
    },
    /// The warehouse rejected or could not complete the query.
    Failure {
        /// Human-readable failure detail from the warehouse boundary.
        error_detail: String,
    },
}

impl ExecutionOutcome {
    /// Returns whether this outcome is a success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
