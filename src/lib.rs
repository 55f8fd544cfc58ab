//! Shopsight: natural-language analytics over a product-sales warehouse.
//!
//! This crate turns free-text analytical questions about a product-sales
//! table into warehouse queries, executes them, and composes a
//! natural-language answer from the tabular result. The centre of the crate
//! is a bounded-retry pipeline coordinating two unreliable external
//! services: a language-model text-completion service and a columnar
//! warehouse query engine.
//!
//! # Architecture
//!
//! Shopsight follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (REST APIs, scripted
//!   test doubles)
//!
//! # Modules
//!
//! - [`analytics`]: the question-answering pipeline and its collaborators

pub mod analytics;
