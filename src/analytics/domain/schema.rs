//! Warehouse table schema descriptor.

use super::AnalyticsDomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Column type in the warehouse's ANSI-compatible type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    /// 64-bit signed integer.
    Int64,
    /// Variable-length character data.
    String,
    /// Absolute point in time.
    Timestamp,
    /// Boolean.
    Bool,
    /// 64-bit floating point.
    Float64,
}

impl ColumnType {
    /// Returns the canonical warehouse spelling of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int64 => "INT64",
            Self::String => "STRING",
            Self::Timestamp => "TIMESTAMP",
            Self::Bool => "BOOL",
            Self::Float64 => "FLOAT64",
        }
    }
}

impl TryFrom<&str> for ColumnType {
    type Error = ParseColumnTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "INT64" => Ok(Self::Int64),
            "STRING" => Ok(Self::String),
            "TIMESTAMP" => Ok(Self::Timestamp),
            "BOOL" => Ok(Self::Bool),
            "FLOAT64" => Ok(Self::Float64),
            _ => Err(ParseColumnTypeError(value.to_owned())),
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing a column type from its warehouse spelling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown column type: {0}")]
pub struct ParseColumnTypeError(pub String);

/// Named, typed column within a schema descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    column_type: ColumnType,
}

impl Column {
    /// Creates a column from a name and warehouse type.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsDomainError::EmptyColumnName`] when the name is
    /// empty after trimming.
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
    ) -> Result<Self, AnalyticsDomainError> {
        let normalized = name.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(AnalyticsDomainError::EmptyColumnName);
        }
        Ok(Self {
            name: normalized,
            column_type,
        })
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column type.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.column_type
    }
}

/// Ordered, immutable description of the warehouse table's columns.
///
/// Supplied once per deployment and embedded into the query-synthesis
/// prompt so the model grounds its SQL in the real column set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDescriptor(Vec<Column>);

impl SchemaDescriptor {
    /// Creates a schema descriptor from an ordered column sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsDomainError::EmptySchema`] when no columns are
    /// given or [`AnalyticsDomainError::DuplicateColumn`] when two columns
    /// share a name.
    pub fn new(columns: Vec<Column>) -> Result<Self, AnalyticsDomainError> {
        if columns.is_empty() {
            return Err(AnalyticsDomainError::EmptySchema);
        }
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(AnalyticsDomainError::DuplicateColumn(
                    column.name().to_owned(),
                ));
            }
        }
        Ok(Self(columns))
    }

    /// Returns the columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.0
    }

    /// Returns the fixed 14-column product-sales schema.
    ///
    /// This is the descriptor every deployment of the products pipeline
    /// supplies; synthesized queries are only consistent with the warehouse
    /// table when grounded in exactly these columns.
    #[must_use]
    pub fn products() -> Self {
        let columns = [
            ("product_id", ColumnType::Int64),
            ("product_type", ColumnType::String),
            ("title", ColumnType::String),
            ("status", ColumnType::String),
            ("created_timestamp", ColumnType::Timestamp),
            ("collections", ColumnType::String),
            ("count_variants", ColumnType::Int64),
            ("has_product_image", ColumnType::Bool),
            ("total_quantity_sold", ColumnType::Float64),
            ("subtotal_sold", ColumnType::Float64),
            ("quantity_sold_net_refunds", ColumnType::Float64),
            ("subtotal_sold_net_refunds", ColumnType::Float64),
            ("product_total_discount", ColumnType::Float64),
            ("product_total_tax", ColumnType::Float64),
        ]
        .into_iter()
        .map(|(name, column_type)| Column {
            name: name.to_owned(),
            column_type,
        })
        .collect();
        Self(columns)
    }
}
