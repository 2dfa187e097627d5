//! gradcheck-core — Graduation requirement evaluation engine.
//!
//! This crate defines the data model, the deterministic evaluation pipeline,
//! and the report types that the entire gradcheck system builds on.

pub mod aggregate;
pub mod classifier;
pub mod competency;
pub mod engine;
pub mod error;
pub mod geneval;
pub mod model;
pub mod overflow;
pub mod parser;
pub mod progress;
pub mod report;
pub mod resolver;
