//! Workload configuration.

use crate::error::WorkloadError;
use crate::retry::RetryPolicy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Transaction length bound used when none is configured.
pub const DEFAULT_TRANSACTION_LENGTH: usize = 10;

/// Configuration of the seed and mutation phases.
///
/// Keys are camelCase in YAML:
///
/// ```yaml
/// nrTables: 10
/// nrSeedRows: 1000
/// deleteRatio: 0.2
/// insertRatio: 0.3
/// concurrency: 8
/// transactionLength: 5
/// retryAttempts: 3
/// retryDelayMs: 1000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkloadConfig {
    /// Number of managed tables.
    pub nr_tables: usize,
    /// Rows inserted into every table before the workload starts.
    pub nr_seed_rows: usize,
    /// Probability that a mutation is a delete.
    pub delete_ratio: f64,
    /// Probability that a mutation is an insert.
    pub insert_ratio: f64,
    /// Number of parallel workers in each phase.
    pub concurrency: usize,
    /// Upper bound on tables touched per transaction; 0 means the default.
    pub transaction_length: usize,
    /// Base random seed; drawn from OS entropy when absent.
    pub seed: Option<u64>,
    /// Attempts per transaction before a worker gives up.
    pub retry_attempts: u32,
    /// Delay between transaction attempts, in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            nr_tables: 10,
            nr_seed_rows: 1000,
            delete_ratio: 0.2,
            insert_ratio: 0.3,
            concurrency: 4,
            transaction_length: 0,
            seed: None,
            retry_attempts: 3,
            retry_delay_ms: 1000,
        }
    }
}

impl WorkloadConfig {
    /// Load and validate a configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WorkloadError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            WorkloadError::Config(format!("cannot read {}: {e}", path.as_ref().display()))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, WorkloadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| WorkloadError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration invariants.
    pub fn validate(&self) -> Result<(), WorkloadError> {
        if self.nr_tables == 0 {
            return Err(WorkloadError::Config("nrTables must be at least 1".into()));
        }
        if self.concurrency == 0 {
            return Err(WorkloadError::Config("concurrency must be at least 1".into()));
        }
        for (name, ratio) in [
            ("deleteRatio", self.delete_ratio),
            ("insertRatio", self.insert_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(WorkloadError::Config(format!(
                    "{name} must be in [0, 1], got {ratio}"
                )));
            }
        }
        if self.delete_ratio + self.insert_ratio > 1.0 {
            return Err(WorkloadError::Config(format!(
                "deleteRatio + insertRatio must not exceed 1, got {}",
                self.delete_ratio + self.insert_ratio
            )));
        }
        if self.retry_attempts == 0 {
            return Err(WorkloadError::Config("retryAttempts must be at least 1".into()));
        }
        Ok(())
    }

    /// Set the number of tables.
    pub fn with_tables(mut self, nr_tables: usize) -> Self {
        self.nr_tables = nr_tables;
        self
    }

    /// Set the number of seed rows per table.
    pub fn with_seed_rows(mut self, nr_seed_rows: usize) -> Self {
        self.nr_seed_rows = nr_seed_rows;
        self
    }

    /// Set the delete and insert ratios.
    pub fn with_ratios(mut self, delete_ratio: f64, insert_ratio: f64) -> Self {
        self.delete_ratio = delete_ratio;
        self.insert_ratio = insert_ratio;
        self
    }

    /// Set the worker count.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the transaction length bound.
    pub fn with_transaction_length(mut self, transaction_length: usize) -> Self {
        self.transaction_length = transaction_length;
        self
    }

    /// Set the base random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, attempts: u32, delay: Duration) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Effective upper bound on transaction length.
    pub fn max_transaction_length(&self) -> usize {
        if self.transaction_length > 0 {
            self.transaction_length
        } else {
            DEFAULT_TRANSACTION_LENGTH
        }
    }

    /// Retry policy for workload transactions.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(
            self.retry_attempts,
            Duration::from_millis(self.retry_delay_ms),
        )
    }

    /// The configured base seed, or a fresh one from OS entropy.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Build an independent random source for one worker stream.
///
/// Streams are spread with a golden-ratio stride so that neighbouring
/// workers do not start from correlated states.
pub fn worker_rng(base_seed: u64, stream: u64) -> StdRng {
    StdRng::seed_from_u64(base_seed.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
}
