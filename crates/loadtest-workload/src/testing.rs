//! In-memory executor and generator used by unit tests.

use async_trait::async_trait;
use loadtest_generator::TableDataGenerator;
use rand::RngCore;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use sync_core::{Executor, ExecutorError, Statement, Transaction, UniversalValue};
use tokio_util::sync::CancellationToken;

/// Generator whose statements name the table and carry the row count.
pub struct FakeGenerator {
    table: String,
}

impl FakeGenerator {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
        }
    }
}

impl TableDataGenerator for FakeGenerator {
    fn table(&self) -> &str {
        &self.table
    }

    fn bulk_insert(&self, count: usize, _rng: &mut dyn RngCore) -> Statement {
        Statement::new(
            format!("INSERT {}", self.table),
            vec![UniversalValue::Int64(count as i64)],
        )
    }

    fn random_mutation(
        &self,
        _delete_ratio: f64,
        _insert_ratio: f64,
        _rng: &mut dyn RngCore,
    ) -> Statement {
        Statement::raw(format!("MUTATE {}", self.table))
    }
}

#[derive(Default)]
struct State {
    executed: Mutex<Vec<Statement>>,
    committed: Mutex<Vec<Vec<String>>>,
    begun: AtomicUsize,
    rollbacks: AtomicUsize,
    fail_standalone: AtomicBool,
    failing_statements: AtomicUsize,
    failing_commits: AtomicUsize,
    always_fail_statements: AtomicBool,
    cancel_after: Mutex<Option<(usize, CancellationToken)>>,
}

/// Executor that records what it is asked to do.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    state: Arc<State>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make standalone `execute` calls fail.
    pub fn fail_standalone_executes(&self, fail: bool) {
        self.state.fail_standalone.store(fail, Ordering::SeqCst);
    }

    /// Fail the next `n` statements executed inside transactions.
    pub fn fail_next_statements(&self, n: usize) {
        self.state.failing_statements.store(n, Ordering::SeqCst);
    }

    /// Fail the next `n` commits.
    pub fn fail_next_commits(&self, n: usize) {
        self.state.failing_commits.store(n, Ordering::SeqCst);
    }

    /// Fail every statement executed inside a transaction.
    pub fn always_fail_statements(&self) {
        self.state
            .always_fail_statements
            .store(true, Ordering::SeqCst);
    }

    /// Cancel `token` once `commits` transactions have committed.
    pub fn cancel_after_commits(&self, commits: usize, token: CancellationToken) {
        *self.state.cancel_after.lock().unwrap() = Some((commits, token));
    }

    pub fn executed(&self) -> Vec<Statement> {
        self.state.executed.lock().unwrap().clone()
    }

    /// SQL of each committed transaction, in commit order.
    pub fn committed(&self) -> Vec<Vec<String>> {
        self.state.committed.lock().unwrap().clone()
    }

    pub fn begun(&self) -> usize {
        self.state.begun.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.state.rollbacks.load(Ordering::SeqCst)
    }
}

fn take_one(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

#[async_trait]
impl Executor for FakeExecutor {
    async fn execute(&self, stmt: &Statement) -> Result<(), ExecutorError> {
        tokio::task::yield_now().await;
        if self.state.fail_standalone.load(Ordering::SeqCst) {
            return Err(ExecutorError::Statement(format!("{stmt}: injected failure")));
        }
        self.state.executed.lock().unwrap().push(stmt.clone());
        Ok(())
    }

    async fn begin(&self) -> Result<Box<dyn Transaction>, ExecutorError> {
        self.state.begun.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeTransaction {
            state: self.state.clone(),
            statements: Vec::new(),
            finished: false,
        }))
    }

    async fn query_row(
        &self,
        _stmt: &Statement,
    ) -> Result<Option<Vec<UniversalValue>>, ExecutorError> {
        Ok(None)
    }
}

struct FakeTransaction {
    state: Arc<State>,
    statements: Vec<String>,
    finished: bool,
}

#[async_trait]
impl Transaction for FakeTransaction {
    async fn execute(&mut self, stmt: &Statement) -> Result<(), ExecutorError> {
        tokio::task::yield_now().await;
        if self.state.always_fail_statements.load(Ordering::SeqCst)
            || take_one(&self.state.failing_statements)
        {
            return Err(ExecutorError::Statement("Deadlock found".into()));
        }
        self.statements.push(stmt.sql.clone());
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), ExecutorError> {
        tokio::task::yield_now().await;
        if take_one(&self.state.failing_commits) {
            return Err(ExecutorError::Commit("injected commit failure".into()));
        }
        self.finished = true;
        let committed = {
            let mut committed = self.state.committed.lock().unwrap();
            committed.push(std::mem::take(&mut self.statements));
            committed.len()
        };
        if let Some((after, token)) = self.state.cancel_after.lock().unwrap().as_ref() {
            if committed >= *after {
                token.cancel();
            }
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), ExecutorError> {
        if !self.finished {
            self.finished = true;
            self.state.rollbacks.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
