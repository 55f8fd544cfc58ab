//! Question answering over the product-sales warehouse.
//!
//! This module implements the translate-execute-summarize pipeline: a
//! natural-language question is turned into a candidate SQL query by the
//! language model, the query is run against the warehouse, and the tabular
//! result is summarized back into prose. Malformed queries are recovered by
//! re-synthesis under a bounded retry budget. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Pipeline stage services and the retry orchestrator in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
