//! Table checksums.

use crate::error::VerifyError;
use async_trait::async_trait;
use loadtest_generator::qualified_name;
use std::fmt;
use std::sync::Arc;
use sync_core::{Executor, Statement, UniversalValue};

/// Opaque per-table checksum as reported by the store.
///
/// MySQL reports `NULL` for tables it cannot checksum; two `NULL`s compare
/// equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checksum(pub Option<u64>);

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("NULL"),
        }
    }
}

/// One side of the comparison.
#[async_trait]
pub trait ChecksumSource: Send + Sync {
    /// Schema this source reads from, used in reports and errors.
    fn schema(&self) -> &str;

    /// Compute the checksum of `table`.
    async fn checksum(&self, table: &str) -> Result<Checksum, VerifyError>;
}

/// Checksums computed with `CHECKSUM TABLE` through an [`Executor`].
pub struct ExecutorChecksumSource {
    executor: Arc<dyn Executor>,
    schema: String,
}

impl ExecutorChecksumSource {
    pub fn new(executor: Arc<dyn Executor>, schema: &str) -> Self {
        Self {
            executor,
            schema: schema.to_string(),
        }
    }

    fn unexpected(&self, table: &str, detail: String) -> VerifyError {
        VerifyError::UnexpectedResult {
            schema: self.schema.clone(),
            table: table.to_string(),
            detail,
        }
    }
}

#[async_trait]
impl ChecksumSource for ExecutorChecksumSource {
    fn schema(&self) -> &str {
        &self.schema
    }

    async fn checksum(&self, table: &str) -> Result<Checksum, VerifyError> {
        let stmt = Statement::raw(format!(
            "CHECKSUM TABLE {}",
            qualified_name(&self.schema, table)
        ));
        let row = self
            .executor
            .query_row(&stmt)
            .await
            .map_err(|source| VerifyError::Query {
                schema: self.schema.clone(),
                table: table.to_string(),
                source,
            })?
            .ok_or_else(|| self.unexpected(table, "no rows returned".into()))?;

        // Rows are (Table, Checksum).
        match row.as_slice() {
            [_, value] => parse_checksum(value)
                .ok_or_else(|| self.unexpected(table, format!("bad checksum value {value}"))),
            other => Err(self.unexpected(
                table,
                format!("expected 2 columns, got {}", other.len()),
            )),
        }
    }
}

fn parse_checksum(value: &UniversalValue) -> Option<Checksum> {
    match value {
        UniversalValue::Null => Some(Checksum(None)),
        UniversalValue::String(s) => s.parse().ok().map(|v| Checksum(Some(v))),
        other => other.as_u64().map(|v| Checksum(Some(v))),
    }
}
