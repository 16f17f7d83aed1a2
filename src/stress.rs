//! Stress run orchestration.
//!
//! A run creates the managed tables on both schemas, seeds the source,
//! mutates it with the transaction workload and finally checks that the
//! target has caught up.

use crate::config::RunConfig;
use anyhow::Context;
use loadtest_verify::{ConsistencyVerifier, ExecutorChecksumSource, VerificationReport};
use loadtest_workload::{
    SeedCoordinator, SeedMetrics, TableRegistry, WorkerPool, WorkloadSummary,
};
use mysql_executor::{mask_connection_password, MySQLExecutor};
use std::sync::Arc;
use std::time::Duration;
use sync_core::Executor;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Totals of a complete run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub seed: SeedMetrics,
    pub workload: WorkloadSummary,
    pub verification: VerificationReport,
}

/// One configured source/target pair.
pub struct StressRun {
    config: RunConfig,
    base_seed: u64,
    registry: Arc<TableRegistry>,
    source: Arc<dyn Executor>,
    target: Arc<dyn Executor>,
}

impl StressRun {
    /// Build a run over already connected executors.
    pub fn new(
        config: RunConfig,
        source: Arc<dyn Executor>,
        target: Arc<dyn Executor>,
    ) -> anyhow::Result<Self> {
        let registry = TableRegistry::mysql(&config.source.schema, config.workload.nr_tables)?;
        let base_seed = config.workload.resolve_seed();
        info!("Using base seed {}", base_seed);
        Ok(Self {
            config,
            base_seed,
            registry: Arc::new(registry),
            source,
            target,
        })
    }

    /// Connect to both MySQL servers named in `config`.
    pub async fn connect(config: RunConfig) -> anyhow::Result<Self> {
        let source = connect_mysql("source", &config.source.connection_string).await?;
        let target = connect_mysql("target", &config.target.connection_string).await?;
        Self::new(config, Arc::new(source), Arc::new(target))
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    /// Create the managed tables on both schemas.
    pub async fn setup(&self) -> anyhow::Result<()> {
        let sides = [
            (self.source.as_ref(), self.config.source.schema.as_str()),
            (self.target.as_ref(), self.config.target.schema.as_str()),
        ];
        for (executor, schema) in sides {
            if self.config.drop_existing {
                self.registry
                    .drop_mysql_tables(executor, schema)
                    .await
                    .with_context(|| format!("Failed to drop tables in '{schema}'"))?;
            }
            self.registry
                .create_mysql_tables(executor, schema)
                .await
                .with_context(|| format!("Failed to create tables in '{schema}'"))?;
        }
        Ok(())
    }

    /// Populate the source tables.
    pub async fn seed(&self) -> anyhow::Result<SeedMetrics> {
        let coordinator = SeedCoordinator::new(
            &self.config.workload,
            self.base_seed,
            self.registry.clone(),
            self.source.clone(),
        );
        coordinator.run().await.context("Seed phase failed")
    }

    /// Start the transaction workload. It runs until `cancel` fires or one
    /// worker fails.
    pub fn start_workload(&self, cancel: CancellationToken) -> WorkerPool {
        // Seed workers use streams 0..concurrency; workload workers continue
        // from there so no stream is reused.
        let stream_offset = self.config.workload.concurrency as u64;
        WorkerPool::spawn(
            &self.config.workload,
            self.base_seed,
            stream_offset,
            self.registry.clone(),
            self.source.clone(),
            cancel,
        )
    }

    /// Run the transaction workload for `duration`.
    pub async fn mutate(&self, duration: Duration) -> anyhow::Result<WorkloadSummary> {
        info!("Running workload for {:?}", duration);
        self.start_workload(CancellationToken::new())
            .run_for(duration)
            .await
            .context("Workload failed")
    }

    fn verifier(&self) -> ConsistencyVerifier {
        ConsistencyVerifier::new(
            Box::new(ExecutorChecksumSource::new(
                self.source.clone(),
                &self.config.source.schema,
            )),
            Box::new(ExecutorChecksumSource::new(
                self.target.clone(),
                &self.config.target.schema,
            )),
        )
        .with_attempts(self.config.verify.attempts)
        .with_interval(self.config.verify.interval())
    }

    /// Wait for the target to converge with the source.
    pub async fn verify(&self) -> anyhow::Result<VerificationReport> {
        self.verifier()
            .verify(&self.registry.table_names())
            .await
            .context("Verification failed")
    }

    /// Compare both sides once, without waiting for replication.
    pub async fn verify_once(&self) -> anyhow::Result<VerificationReport> {
        self.verifier()
            .verify_once(&self.registry.table_names())
            .await
            .context("Verification failed")
    }

    /// Setup, seed, mutate for `duration`, then verify.
    pub async fn run(&self, duration: Duration) -> anyhow::Result<RunReport> {
        self.setup().await?;
        let seed = self.seed().await?;
        let workload = self.mutate(duration).await?;
        let verification = self.verify().await?;

        info!(
            "Run complete: {} seed rows, {} transactions ({} failed attempts), {} tables verified",
            seed.rows_inserted,
            workload.committed,
            workload.failed_attempts,
            verification.tables.len()
        );
        Ok(RunReport {
            seed,
            workload,
            verification,
        })
    }
}

async fn connect_mysql(side: &str, connection_string: &str) -> anyhow::Result<MySQLExecutor> {
    info!(
        "Connecting to {} MySQL: {}",
        side,
        mask_connection_password(connection_string)
    );
    let executor = MySQLExecutor::connect(connection_string)
        .with_context(|| format!("Invalid {side} connection string"))?;
    executor
        .ping()
        .await
        .with_context(|| format!("Failed to connect to {side} MySQL"))?;
    Ok(executor)
}
