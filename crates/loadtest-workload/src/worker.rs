//! Concurrent randomized transaction workload.
//!
//! Each worker loops until cancelled, building a random multi-table
//! transaction per iteration and executing it against the source schema.
//! Table operations inside a transaction are applied in ascending table
//! index order across all workers, which makes circular waits between
//! workers less likely. It does not rule them out, so deadlocks and other
//! conflicts are retried under a [`RetryPolicy`].

use crate::config::{worker_rng, WorkloadConfig};
use crate::error::WorkloadError;
use crate::metrics::{WorkloadMetrics, WorkloadSummary};
use crate::registry::TableRegistry;
use crate::retry::RetryPolicy;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use sync_core::{Executor, ExecutorError, Transaction};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// The tables touched by one transaction, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionPlan {
    tables: Vec<usize>,
}

impl TransactionPlan {
    /// Draw a plan: a length uniform in `[1, max_len]`, then that many table
    /// indices uniform in `[0, table_count)`, sorted ascending.
    ///
    /// Indices are not deduplicated, so a transaction may hit the same table
    /// more than once.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, table_count: usize, max_len: usize) -> Self {
        let len = rng.random_range(1..=max_len.max(1));
        let mut tables: Vec<usize> = (0..len)
            .map(|_| rng.random_range(0..table_count))
            .collect();
        tables.sort_unstable();
        Self { tables }
    }

    pub fn tables(&self) -> &[usize] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// One worker of the mutation phase.
///
/// Owns its random source; nothing else in the process draws from it.
pub struct TransactionWorker {
    id: usize,
    registry: Arc<TableRegistry>,
    executor: Arc<dyn Executor>,
    delete_ratio: f64,
    insert_ratio: f64,
    max_len: usize,
    retry: RetryPolicy,
    metrics: Arc<WorkloadMetrics>,
    rng: StdRng,
}

impl TransactionWorker {
    pub fn new(
        id: usize,
        config: &WorkloadConfig,
        rng: StdRng,
        registry: Arc<TableRegistry>,
        executor: Arc<dyn Executor>,
        metrics: Arc<WorkloadMetrics>,
    ) -> Self {
        Self {
            id,
            registry,
            executor,
            delete_ratio: config.delete_ratio,
            insert_ratio: config.insert_ratio,
            max_len: config.max_transaction_length(),
            retry: config.retry_policy(),
            metrics,
            rng,
        }
    }

    /// Run transactions until `cancel` fires. The token is checked between
    /// transactions only; an in-flight transaction always runs to completion.
    ///
    /// Returns the number of committed transactions, or the error that made
    /// this worker give up.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<u64, WorkloadError> {
        debug!(worker = self.id, "Transaction worker started");
        let mut committed = 0u64;
        while !cancel.is_cancelled() {
            self.run_with_retry().await?;
            committed += 1;
        }
        debug!(worker = self.id, committed, "Transaction worker stopped");
        Ok(committed)
    }

    /// Execute one transaction, re-drawing and re-running it on failure.
    async fn run_with_retry(&mut self) -> Result<(), WorkloadError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.attempt().await {
                Ok(plan) => {
                    self.metrics.record_commit(plan.len());
                    return Ok(());
                }
                Err(e) if self.retry.allows_retry(attempt) => {
                    self.metrics.record_failed_attempt();
                    warn!(
                        worker = self.id,
                        attempt, "Transaction failed, retrying: {}", e
                    );
                    self.retry.wait().await;
                }
                Err(e) => {
                    self.metrics.record_failed_attempt();
                    error!(worker = self.id, attempt, "Transaction failed: {}", e);
                    return Err(WorkloadError::RetriesExhausted {
                        worker: self.id,
                        attempts: attempt,
                        source: e,
                    });
                }
            }
        }
    }

    /// One attempt: draw a plan, execute it in a transaction, commit.
    async fn attempt(&mut self) -> Result<TransactionPlan, ExecutorError> {
        let plan = TransactionPlan::random(&mut self.rng, self.registry.len(), self.max_len);
        let mut tx = self.executor.begin().await?;

        for &index in plan.tables() {
            let stmt = self.registry.get(index).generator().random_mutation(
                self.delete_ratio,
                self.insert_ratio,
                &mut self.rng,
            );
            if let Err(e) = tx.execute(&stmt).await {
                rollback(tx.as_mut(), self.id).await;
                return Err(e);
            }
        }

        if let Err(e) = tx.commit().await {
            rollback(tx.as_mut(), self.id).await;
            return Err(e);
        }
        Ok(plan)
    }
}

async fn rollback(tx: &mut dyn Transaction, worker: usize) {
    if let Err(e) = tx.rollback().await {
        warn!(worker, "Rollback failed: {}", e);
    }
}

/// The running pool of transaction workers.
pub struct WorkerPool {
    tasks: JoinSet<Result<u64, WorkloadError>>,
    cancel: CancellationToken,
    metrics: Arc<WorkloadMetrics>,
}

impl WorkerPool {
    /// Spawn `config.concurrency` workers. Worker `i` draws from random
    /// stream `stream_offset + i` of `base_seed`.
    pub fn spawn(
        config: &WorkloadConfig,
        base_seed: u64,
        stream_offset: u64,
        registry: Arc<TableRegistry>,
        executor: Arc<dyn Executor>,
        cancel: CancellationToken,
    ) -> Self {
        let metrics = Arc::new(WorkloadMetrics::default());
        let mut tasks = JoinSet::new();

        for id in 0..config.concurrency {
            let worker = TransactionWorker::new(
                id,
                config,
                worker_rng(base_seed, stream_offset + id as u64),
                registry.clone(),
                executor.clone(),
                metrics.clone(),
            );
            tasks.spawn(worker.run(cancel.clone()));
        }
        info!(
            "Started {} transaction workers over {} tables",
            config.concurrency,
            registry.len()
        );

        Self {
            tasks,
            cancel,
            metrics,
        }
    }

    /// Live counters of the running workers.
    pub fn metrics(&self) -> Arc<WorkloadMetrics> {
        self.metrics.clone()
    }

    /// Ask every worker to stop after its current transaction.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for all workers to stop.
    ///
    /// When one worker fails, the others are cancelled and the first failure
    /// is returned once all of them have stopped.
    pub async fn join(self) -> Result<WorkloadSummary, WorkloadError> {
        self.wait(None).await
    }

    /// Let the workers run for `duration`, then cancel and wait for them.
    pub async fn run_for(self, duration: Duration) -> Result<WorkloadSummary, WorkloadError> {
        self.wait(Some(duration)).await
    }

    async fn wait(mut self, duration: Option<Duration>) -> Result<WorkloadSummary, WorkloadError> {
        let deadline = tokio::time::sleep(duration.unwrap_or(Duration::MAX));
        tokio::pin!(deadline);
        let mut timed = duration.is_some();
        let mut first_error: Option<WorkloadError> = None;

        loop {
            tokio::select! {
                _ = &mut deadline, if timed => {
                    info!("Workload duration elapsed, stopping workers");
                    timed = false;
                    self.cancel.cancel();
                }
                joined = self.tasks.join_next() => {
                    let Some(joined) = joined else { break };
                    let result = joined.map_err(WorkloadError::from).and_then(|r| r);
                    if let Err(e) = result {
                        if first_error.is_none() {
                            error!("Worker failed, stopping the workload: {}", e);
                            self.cancel.cancel();
                            first_error = Some(e);
                        }
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                let summary = self.metrics.snapshot();
                info!(
                    "Workload finished: {} transactions committed, {} failed attempts",
                    summary.committed, summary.failed_attempts
                );
                Ok(summary)
            }
        }
    }
}
