//! needlegrade-core — grading and positional-error classification engine.
//!
//! This crate holds the pure algorithms that compare a reference answer set
//! against a model response: edit-distance accuracy scoring, LCS anchor
//! alignment, misorder/missing/hallucination classification, and batch-level
//! frequency aggregation. The async batch engine, record sources, and report
//! types live here too; everything else (test generation, model API clients,
//! dashboards) is external and consumes the report JSON.

pub mod aggregate;
pub mod align;
pub mod classify;
pub mod distance;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod score;
pub mod sequence;
pub mod statistics;
pub mod traits;
