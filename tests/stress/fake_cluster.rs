//! In-memory replicated schema pair.
//!
//! The source executor counts committed writes per table. The target
//! executor answers `CHECKSUM TABLE` with the source's value for the same
//! table, optionally lagging for a number of reads, which models an
//! asynchronous replica.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use sync_core::{Executor, ExecutorError, Statement, Transaction, UniversalValue};

#[derive(Default)]
struct ClusterState {
    /// Writes applied per table name on the source.
    writes: HashMap<String, u64>,
    /// DDL seen per schema.
    ddl: Vec<String>,
    /// Target checksum reads that still return a stale value.
    stale_reads: usize,
    /// Target never converges.
    diverged: bool,
    commits: u64,
}

#[derive(Clone, Default)]
pub struct FakeCluster {
    state: Arc<Mutex<ClusterState>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `reads` target checksums stale.
    pub fn lag_for(&self, reads: usize) {
        self.state.lock().unwrap().stale_reads = reads;
    }

    pub fn diverge(&self) {
        self.state.lock().unwrap().diverged = true;
    }

    pub fn source(&self) -> Arc<dyn Executor> {
        Arc::new(SideExecutor {
            state: self.state.clone(),
            role: Role::Source,
        })
    }

    pub fn target(&self) -> Arc<dyn Executor> {
        Arc::new(SideExecutor {
            state: self.state.clone(),
            role: Role::Target,
        })
    }

    pub fn writes(&self, table: &str) -> u64 {
        self.state
            .lock()
            .unwrap()
            .writes
            .get(table)
            .copied()
            .unwrap_or(0)
    }

    pub fn ddl(&self) -> Vec<String> {
        self.state.lock().unwrap().ddl.clone()
    }

    pub fn commits(&self) -> u64 {
        self.state.lock().unwrap().commits
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Role {
    Source,
    Target,
}

/// Table name from the first backtick-quoted `schema`.`table` in `sql`.
fn table_of(sql: &str) -> Option<String> {
    let start = sql.find("`.`")? + 3;
    let len = sql[start..].find('`')?;
    Some(sql[start..start + len].to_string())
}

struct SideExecutor {
    state: Arc<Mutex<ClusterState>>,
    role: Role,
}

#[async_trait]
impl Executor for SideExecutor {
    async fn execute(&self, stmt: &Statement) -> Result<(), ExecutorError> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().unwrap();
        if stmt.sql.starts_with("CREATE") || stmt.sql.starts_with("DROP") {
            state.ddl.push(stmt.sql.clone());
            return Ok(());
        }
        if self.role == Role::Target {
            return Err(ExecutorError::Statement("target is read-only".into()));
        }
        let table = table_of(&stmt.sql)
            .ok_or_else(|| ExecutorError::Statement(format!("no table in {stmt}")))?;
        *state.writes.entry(table).or_insert(0) += 1;
        Ok(())
    }

    async fn begin(&self) -> Result<Box<dyn Transaction>, ExecutorError> {
        if self.role == Role::Target {
            return Err(ExecutorError::Connection("target is read-only".into()));
        }
        Ok(Box::new(FakeTransaction {
            state: self.state.clone(),
            pending: Vec::new(),
        }))
    }

    async fn query_row(
        &self,
        stmt: &Statement,
    ) -> Result<Option<Vec<UniversalValue>>, ExecutorError> {
        let table = table_of(&stmt.sql)
            .ok_or_else(|| ExecutorError::Statement(format!("no table in {stmt}")))?;
        let mut state = self.state.lock().unwrap();
        let writes = state.writes.get(&table).copied().unwrap_or(0);

        let checksum = match self.role {
            Role::Source => writes,
            Role::Target if state.diverged => writes + 1,
            Role::Target if state.stale_reads > 0 => {
                state.stale_reads -= 1;
                writes.saturating_sub(1)
            }
            Role::Target => writes,
        };
        Ok(Some(vec![
            UniversalValue::String(table),
            UniversalValue::UInt64(checksum),
        ]))
    }
}

struct FakeTransaction {
    state: Arc<Mutex<ClusterState>>,
    pending: Vec<String>,
}

#[async_trait]
impl Transaction for FakeTransaction {
    async fn execute(&mut self, stmt: &Statement) -> Result<(), ExecutorError> {
        tokio::task::yield_now().await;
        let table = table_of(&stmt.sql)
            .ok_or_else(|| ExecutorError::Statement(format!("no table in {stmt}")))?;
        self.pending.push(table);
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), ExecutorError> {
        let mut state = self.state.lock().unwrap();
        for table in self.pending.drain(..) {
            *state.writes.entry(table).or_insert(0) += 1;
        }
        state.commits += 1;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), ExecutorError> {
        self.pending.clear();
        Ok(())
    }
}
