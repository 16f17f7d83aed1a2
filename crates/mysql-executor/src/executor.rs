//! `Executor` and `Transaction` over a `mysql_async` pool.

use crate::value::{from_mysql, to_params};
use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Pool, Row, TxOpts};
use sync_core::{Executor, ExecutorError, Statement, Transaction, UniversalValue};
use tracing::{debug, warn};

/// Executor bound to one MySQL schema.
#[derive(Clone)]
pub struct MySQLExecutor {
    pool: Pool,
}

impl MySQLExecutor {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create an executor from a connection URL.
    pub fn connect(connection_string: &str) -> Result<Self, ExecutorError> {
        Ok(Self::new(crate::client::new_mysql_pool(connection_string)?))
    }

    /// Check that a connection can be established.
    pub async fn ping(&self) -> Result<(), ExecutorError> {
        let mut conn = self.conn().await?;
        let _: Option<u8> = conn
            .query_first("SELECT 1")
            .await
            .map_err(|e| ExecutorError::Connection(e.to_string()))?;
        Ok(())
    }

    /// Close all pooled connections.
    pub async fn disconnect(self) -> Result<(), ExecutorError> {
        self.pool
            .disconnect()
            .await
            .map_err(|e| ExecutorError::Connection(e.to_string()))
    }

    async fn conn(&self) -> Result<mysql_async::Conn, ExecutorError> {
        self.pool
            .get_conn()
            .await
            .map_err(|e| ExecutorError::Connection(e.to_string()))
    }
}

#[async_trait]
impl Executor for MySQLExecutor {
    async fn execute(&self, stmt: &Statement) -> Result<(), ExecutorError> {
        let mut conn = self.conn().await?;
        conn.exec_drop(stmt.sql.as_str(), to_params(&stmt.args))
            .await
            .map_err(|e| ExecutorError::Statement(format!("{stmt}: {e}")))
    }

    async fn begin(&self) -> Result<Box<dyn Transaction>, ExecutorError> {
        let tx = self
            .pool
            .start_transaction(TxOpts::default())
            .await
            .map_err(|e| ExecutorError::Connection(e.to_string()))?;
        Ok(Box::new(MySQLTransaction { tx: Some(tx) }))
    }

    async fn query_row(
        &self,
        stmt: &Statement,
    ) -> Result<Option<Vec<UniversalValue>>, ExecutorError> {
        let mut conn = self.conn().await?;
        // Argument-less statements go over the text protocol: not every
        // administrative statement can be prepared.
        let result: mysql_async::Result<Option<Row>> = if stmt.args.is_empty() {
            conn.query_first(stmt.sql.as_str()).await
        } else {
            conn.exec_first(stmt.sql.as_str(), to_params(&stmt.args))
                .await
        };
        let row = result.map_err(|e| ExecutorError::Statement(format!("{stmt}: {e}")))?;

        Ok(row.map(|row| row.unwrap().into_iter().map(from_mysql).collect()))
    }
}

/// An open MySQL transaction.
///
/// The inner transaction is taken on commit or rollback; a second call is a
/// no-op. Dropping an unfinished transaction rolls it back when the
/// connection returns to the pool.
pub struct MySQLTransaction {
    tx: Option<mysql_async::Transaction<'static>>,
}

#[async_trait]
impl Transaction for MySQLTransaction {
    async fn execute(&mut self, stmt: &Statement) -> Result<(), ExecutorError> {
        let tx = self
            .tx
            .as_mut()
            .ok_or_else(|| ExecutorError::Statement("transaction already finished".into()))?;
        tx.exec_drop(stmt.sql.as_str(), to_params(&stmt.args))
            .await
            .map_err(|e| ExecutorError::Statement(format!("{stmt}: {e}")))
    }

    async fn commit(&mut self) -> Result<(), ExecutorError> {
        match self.tx.take() {
            Some(tx) => tx
                .commit()
                .await
                .map_err(|e| ExecutorError::Commit(e.to_string())),
            None => Err(ExecutorError::Commit("transaction already finished".into())),
        }
    }

    async fn rollback(&mut self) -> Result<(), ExecutorError> {
        match self.tx.take() {
            Some(tx) => tx
                .rollback()
                .await
                .map_err(|e| ExecutorError::Rollback(e.to_string())),
            None => {
                debug!("rollback on finished transaction ignored");
                Ok(())
            }
        }
    }
}

impl Drop for MySQLTransaction {
    fn drop(&mut self) {
        if self.tx.is_some() {
            warn!("MySQL transaction dropped without commit or rollback");
        }
    }
}
