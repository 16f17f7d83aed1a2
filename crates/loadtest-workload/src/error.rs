//! Error types for the workload driver.

use sync_core::ExecutorError;
use thiserror::Error;

/// Errors that can occur while seeding or running the workload.
#[derive(Error, Debug)]
pub enum WorkloadError {
    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Creating a managed table failed.
    #[error("Failed to create table '{table}' in schema '{schema}': {source}")]
    Setup {
        schema: String,
        table: String,
        source: ExecutorError,
    },

    /// A seed batch failed. Seeding is never retried.
    #[error("Failed to seed table '{table}' ({rows} rows): {source}")]
    Seed {
        table: String,
        rows: usize,
        source: ExecutorError,
    },

    /// A worker ran out of attempts for one transaction.
    #[error("Worker {worker} gave up after {attempts} attempts: {source}")]
    RetriesExhausted {
        worker: usize,
        attempts: u32,
        source: ExecutorError,
    },

    /// A worker task panicked or was aborted.
    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
