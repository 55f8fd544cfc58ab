//! Per-turn query request and the warehouse table identifier.

use super::{AnalyticsDomainError, ConversationTurn, SchemaDescriptor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dataset holding the product-sales table.
const PRODUCTS_DATASET: &str = "shopify_ai";

/// Name of the product-sales table.
const PRODUCTS_TABLE: &str = "shopify_products";

/// Fully-qualified warehouse table identifier (`project.dataset.table`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId {
    project: String,
    dataset: String,
    table: String,
}

impl TableId {
    /// Creates a table identifier from its three segments.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsDomainError::EmptyTableIdSegment`] when any
    /// segment is empty after trimming.
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Result<Self, AnalyticsDomainError> {
        let project_segment = non_empty_segment(project, "project")?;
        let dataset_segment = non_empty_segment(dataset, "dataset")?;
        let table_segment = non_empty_segment(table, "table")?;
        Ok(Self {
            project: project_segment,
            dataset: dataset_segment,
            table: table_segment,
        })
    }

    /// Creates the identifier of the product-sales table in the given
    /// project, using the fixed dataset and table names.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsDomainError::EmptyTableIdSegment`] when the
    /// project id is empty after trimming.
    pub fn products(project: impl Into<String>) -> Result<Self, AnalyticsDomainError> {
        Self::new(project, PRODUCTS_DATASET, PRODUCTS_TABLE)
    }

    /// Returns the project segment.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Returns the dataset segment.
    #[must_use]
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Returns the table segment.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project, self.dataset, self.table)
    }
}

fn non_empty_segment(
    value: impl Into<String>,
    segment: &'static str,
) -> Result<String, AnalyticsDomainError> {
    let normalized = value.into().trim().to_owned();
    if normalized.is_empty() {
        return Err(AnalyticsDomainError::EmptyTableIdSegment(segment));
    }
    Ok(normalized)
}

/// One user turn's input to the pipeline.
///
/// Constructed once per question and consumed by the pipeline; immutable
/// thereafter. The history is a value copy owned by this request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    question: String,
    history: Vec<ConversationTurn>,
    schema: SchemaDescriptor,
    table_id: TableId,
}

impl QueryRequest {
    /// Creates a request for a single question.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsDomainError::EmptyQuestion`] when the question is
    /// empty after trimming.
    pub fn new(
        question: impl Into<String>,
        history: Vec<ConversationTurn>,
        schema: SchemaDescriptor,
        table_id: TableId,
    ) -> Result<Self, AnalyticsDomainError> {
        let normalized = question.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(AnalyticsDomainError::EmptyQuestion);
        }
        Ok(Self {
            question: normalized,
            history,
            schema,
            table_id,
        })
    }

    /// Returns the question text.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Returns the prior conversation turns.
    #[must_use]
    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    /// Returns the schema descriptor grounding query synthesis.
    #[must_use]
    pub const fn schema(&self) -> &SchemaDescriptor {
        &self.schema
    }

    /// Returns the fully-qualified target table identifier.
    #[must_use]
    pub const fn table_id(&self) -> &TableId {
        &self.table_id
    }
}
