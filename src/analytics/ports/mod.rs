//! Port contracts for the pipeline's external collaborators.

pub mod language_model;
pub mod warehouse;

pub use language_model::{LanguageModel, LanguageModelResult, ModelRequest, ModelUnavailable};
pub use warehouse::{Warehouse, WarehouseError, WarehouseResult};

#[cfg(test)]
pub use language_model::MockLanguageModel;
#[cfg(test)]
pub use warehouse::MockWarehouse;
