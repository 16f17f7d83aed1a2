//! Transactional executor abstraction.
//!
//! The workload driver and the verifier only talk to the database through
//! these traits. `mysql-executor` provides the production implementation;
//! tests use in-memory fakes.

use crate::statement::Statement;
use crate::values::UniversalValue;
use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by an executor.
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// Could not obtain a connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Statement execution failed.
    #[error("Statement failed: {0}")]
    Statement(String),

    /// Commit failed.
    #[error("Commit failed: {0}")]
    Commit(String),

    /// Rollback failed.
    #[error("Rollback failed: {0}")]
    Rollback(String),
}

/// An open transaction.
///
/// `commit` and `rollback` take `&mut self` so that a caller can still roll
/// back after a failed commit. Implementations treat a rollback of an already
/// finished transaction as a no-op.
#[async_trait]
pub trait Transaction: Send {
    /// Execute a statement inside the transaction.
    async fn execute(&mut self, stmt: &Statement) -> Result<(), ExecutorError>;

    /// Commit the transaction.
    async fn commit(&mut self) -> Result<(), ExecutorError>;

    /// Roll back the transaction.
    async fn rollback(&mut self) -> Result<(), ExecutorError>;
}

/// A handle to one schema of the database.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Execute a single statement outside of an explicit transaction.
    async fn execute(&self, stmt: &Statement) -> Result<(), ExecutorError>;

    /// Open a transaction.
    async fn begin(&self) -> Result<Box<dyn Transaction>, ExecutorError>;

    /// Run a query and return its first row, if any.
    async fn query_row(&self, stmt: &Statement)
        -> Result<Option<Vec<UniversalValue>>, ExecutorError>;
}
