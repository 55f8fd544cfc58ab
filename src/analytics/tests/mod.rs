//! Unit tests for the analytics module.
//!
//! Tests are organised by concern: domain value types, prompt rendering,
//! and orchestration of the retry pipeline.

mod domain_tests;
mod pipeline_tests;
mod prompt_tests;
