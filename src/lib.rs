//! sync-stress
//!
//! Write-pressure generator and consistency checker for replicated MySQL
//! schemas. It seeds a set of tables on the source, hammers them with
//! concurrent randomized multi-table transactions, and then verifies that
//! the replication target converged to the same table checksums.
//!
//! It also ships the change-event filters used on the replication path,
//! runnable over JSON-lines event dumps.
//!
//! # CLI Usage
//!
//! ```bash
//! # Full run: create tables, seed, mutate for 5 minutes, verify
//! sync-stress run --config stress.yaml --duration 5m
//!
//! # Individual phases
//! sync-stress seed --config stress.yaml
//! sync-stress verify --config stress.yaml
//!
//! # Redact columns from captured change events
//! sync-stress filter --config filters.toml --input events.jsonl
//! ```

use anyhow::Context;
use clap::Args;

pub mod config;
pub mod filter;
pub mod stress;

pub use config::{DatabaseConfig, RunConfig, VerifySettings};
pub use filter::{filter_events, FilterStats};
pub use stress::{RunReport, StressRun};

/// Connection string overrides for the two sides of a run.
#[derive(Args, Clone, Debug, Default)]
pub struct ConnectionOpts {
    /// Source MySQL connection string (overrides the config file)
    #[arg(long, env = "SOURCE_MYSQL_CONNECTION_STRING")]
    pub source_connection_string: Option<String>,

    /// Target MySQL connection string (overrides the config file)
    #[arg(long, env = "TARGET_MYSQL_CONNECTION_STRING")]
    pub target_connection_string: Option<String>,
}

impl ConnectionOpts {
    /// Load `path`, apply these overrides and validate the result.
    pub fn load_config(&self, path: &std::path::Path) -> anyhow::Result<RunConfig> {
        let mut config = RunConfig::from_file(path)?;
        config.apply_overrides(
            self.source_connection_string.clone(),
            self.target_connection_string.clone(),
        );
        config
            .validate()
            .context("Invalid connection string override")?;
        Ok(config)
    }
}
