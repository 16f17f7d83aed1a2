//! Core types for the sync-stress workload driver.
//!
//! This crate provides the foundational types shared by every other crate
//! in the workspace:
//!
//! - [`UniversalValue`] - Database-agnostic column value
//! - [`Statement`] - SQL text with positional arguments
//! - [`ChangeEvent`] - Change-capture event consumed by filters
//! - [`Executor`] / [`Transaction`] - The opaque database boundary
//!
//! # Architecture
//!
//! ```text
//! sync-core (this crate)
//!    │
//!    ├─── loadtest-generator  (produces Statements)
//!    ├─── mysql-executor      (implements Executor for MySQL)
//!    ├─── loadtest-workload   (seeds and mutates through Executor)
//!    ├─── loadtest-verify     (checksums through Executor)
//!    └─── filters             (rewrites ChangeEvents)
//! ```

pub mod change;
pub mod executor;
pub mod statement;
pub mod values;

// Re-exports for convenience
pub use change::{ChangeEvent, DmlPayload};
pub use executor::{Executor, ExecutorError, Transaction};
pub use statement::Statement;
pub use values::{Row, UniversalValue};
