//! Adapter implementations of the pipeline ports.

pub mod http;
pub mod memory;
