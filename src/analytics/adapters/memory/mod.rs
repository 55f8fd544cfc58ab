//! Scripted in-memory adapters for deterministic tests.

mod language_model;
mod warehouse;

pub use language_model::ScriptedLanguageModel;
pub use warehouse::ScriptedWarehouse;
