//! Workload driver for replication stress runs.
//!
//! Seeds a fixed set of tables on the source schema, then keeps a pool of
//! workers running randomized multi-table transactions against it until
//! cancelled:
//!
//! - [`TableRegistry`] holds the managed tables and their generators
//! - [`SeedCoordinator`] bulk-loads every table in parallel batches
//! - [`WorkerPool`] runs [`TransactionWorker`]s with retry on conflicts
//!
//! # Example
//!
//! ```ignore
//! use loadtest_workload::{SeedCoordinator, TableRegistry, WorkerPool, WorkloadConfig};
//!
//! let config = WorkloadConfig::from_file("workload.yaml")?;
//! let seed = config.resolve_seed();
//! let registry = Arc::new(TableRegistry::mysql("source_db", config.nr_tables)?);
//! SeedCoordinator::new(&config, seed, registry.clone(), executor.clone()).run().await?;
//!
//! let pool = WorkerPool::spawn(&config, seed, config.concurrency as u64, registry, executor, cancel);
//! let summary = pool.run_for(Duration::from_secs(60)).await?;
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod registry;
pub mod retry;
pub mod seed;
pub mod worker;

#[cfg(test)]
mod testing;

pub use config::{worker_rng, WorkloadConfig, DEFAULT_TRANSACTION_LENGTH};
pub use error::WorkloadError;
pub use metrics::{SeedMetrics, WorkloadMetrics, WorkloadSummary};
pub use registry::{table_name, TableHandle, TableRegistry};
pub use retry::RetryPolicy;
pub use seed::{plan_seed_tasks, SeedCoordinator, SeedTask, SEED_BATCH_SIZE};
pub use worker::{TransactionPlan, TransactionWorker, WorkerPool};
