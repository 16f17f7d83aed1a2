//! Parallel initial population of the managed tables.

use crate::config::{worker_rng, WorkloadConfig};
use crate::error::WorkloadError;
use crate::metrics::SeedMetrics;
use crate::registry::TableRegistry;
use std::sync::Arc;
use std::time::Instant;
use sync_core::Executor;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Maximum number of rows inserted by one seed statement.
pub const SEED_BATCH_SIZE: usize = 500;

/// One bulk insert: `rows` rows into the table at `table_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedTask {
    pub table_index: usize,
    pub rows: usize,
}

/// Split `rows_per_table` rows for each table into batches of at most
/// [`SEED_BATCH_SIZE`] rows: full batches first, then one partial batch when
/// the row count is not a multiple of the batch size.
pub fn plan_seed_tasks(table_count: usize, rows_per_table: usize) -> Vec<SeedTask> {
    let full = rows_per_table / SEED_BATCH_SIZE;
    let remainder = rows_per_table % SEED_BATCH_SIZE;

    let mut tasks = Vec::with_capacity(table_count * (full + 1));
    for table_index in 0..table_count {
        tasks.extend((0..full).map(|_| SeedTask {
            table_index,
            rows: SEED_BATCH_SIZE,
        }));
        if remainder > 0 {
            tasks.push(SeedTask {
                table_index,
                rows: remainder,
            });
        }
    }
    tasks
}

/// Fills every managed table of the source schema with the configured number
/// of seed rows.
///
/// Seeding assumes an otherwise idle database: the first failed batch aborts
/// the phase and is not retried.
pub struct SeedCoordinator {
    registry: Arc<TableRegistry>,
    executor: Arc<dyn Executor>,
    rows_per_table: usize,
    concurrency: usize,
    base_seed: u64,
}

impl SeedCoordinator {
    pub fn new(
        config: &WorkloadConfig,
        base_seed: u64,
        registry: Arc<TableRegistry>,
        executor: Arc<dyn Executor>,
    ) -> Self {
        Self {
            registry,
            executor,
            rows_per_table: config.nr_seed_rows,
            concurrency: config.concurrency.max(1),
            base_seed,
        }
    }

    /// Run the seed phase to completion.
    pub async fn run(&self) -> Result<SeedMetrics, WorkloadError> {
        if self.rows_per_table == 0 {
            debug!("No seed rows configured, skipping seed phase");
            return Ok(SeedMetrics::default());
        }

        let start = Instant::now();
        let tasks = plan_seed_tasks(self.registry.len(), self.rows_per_table);
        info!(
            "Seeding {} tables with {} rows each ({} batches, {} workers)",
            self.registry.len(),
            self.rows_per_table,
            tasks.len(),
            self.concurrency
        );

        // Every task is queued before the workers start; a closed, drained
        // channel tells them to stop.
        let (tx, rx) = mpsc::channel(tasks.len());
        for task in tasks {
            tx.send(task)
                .await
                .map_err(|e| WorkloadError::Config(format!("seed queue closed: {e}")))?;
        }
        drop(tx);
        let queue = Arc::new(Mutex::new(rx));

        let mut workers = JoinSet::new();
        for worker in 0..self.concurrency {
            let queue = queue.clone();
            let registry = self.registry.clone();
            let executor = self.executor.clone();
            let mut rng = worker_rng(self.base_seed, worker as u64);

            workers.spawn(async move {
                let mut metrics = SeedMetrics::default();
                loop {
                    let task = queue.lock().await.recv().await;
                    let Some(task) = task else { break };

                    let table = registry.get(task.table_index);
                    let stmt = table.generator().bulk_insert(task.rows, &mut rng);
                    executor
                        .execute(&stmt)
                        .await
                        .map_err(|source| WorkloadError::Seed {
                            table: table.name().to_string(),
                            rows: task.rows,
                            source,
                        })?;

                    debug!(worker, table = table.name(), rows = task.rows, "Seed batch done");
                    metrics.tasks += 1;
                    metrics.rows_inserted += task.rows as u64;
                }
                Ok::<_, WorkloadError>(metrics)
            });
        }

        let mut total = SeedMetrics::default();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(metrics)) => {
                    total.tasks += metrics.tasks;
                    total.rows_inserted += metrics.rows_inserted;
                }
                Ok(Err(e)) => {
                    workers.abort_all();
                    return Err(e);
                }
                Err(e) => {
                    workers.abort_all();
                    return Err(e.into());
                }
            }
        }

        total.duration = start.elapsed();
        info!(
            "Seeded {} rows in {} batches in {:?}",
            total.rows_inserted, total.tasks, total.duration
        );
        Ok(total)
    }
}
