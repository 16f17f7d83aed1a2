//! Source/target convergence check.

use crate::checksum::{Checksum, ChecksumSource};
use crate::error::VerifyError;
use crate::report::{TableVerification, VerificationReport};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default number of comparisons per table.
pub const DEFAULT_ATTEMPTS: u32 = 5;

/// Default wait between comparisons of one table.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Compares per-table checksums of the source and the target schema.
///
/// Replication is asynchronous, so a mismatch is only reported after the
/// table has failed to converge for the whole attempt budget.
pub struct ConsistencyVerifier {
    source: Box<dyn ChecksumSource>,
    target: Box<dyn ChecksumSource>,
    attempts: u32,
    interval: Duration,
}

impl ConsistencyVerifier {
    pub fn new(source: Box<dyn ChecksumSource>, target: Box<dyn ChecksumSource>) -> Self {
        Self {
            source,
            target,
            attempts: DEFAULT_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Set the number of comparisons per table. Values below 1 are treated
    /// as 1.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Set the wait between comparisons of one table.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Verify every table in order, waiting for lagging tables to converge.
    ///
    /// Stops at the first table that never converges.
    pub async fn verify(&self, tables: &[String]) -> Result<VerificationReport, VerifyError> {
        self.verify_with(tables, self.attempts).await
    }

    /// Compare every table once, without waiting.
    pub async fn verify_once(&self, tables: &[String]) -> Result<VerificationReport, VerifyError> {
        self.verify_with(tables, 1).await
    }

    async fn verify_with(
        &self,
        tables: &[String],
        attempts: u32,
    ) -> Result<VerificationReport, VerifyError> {
        let start = Instant::now();
        info!(
            "Verifying {} tables: '{}' against '{}'",
            tables.len(),
            self.source.schema(),
            self.target.schema()
        );

        let mut report = VerificationReport::default();
        for table in tables {
            report.tables.push(self.verify_table(table, attempts).await?);
        }
        report.total_duration = start.elapsed();

        info!(
            "Verification complete: {} tables consistent in {:?}",
            report.tables.len(),
            report.total_duration
        );
        Ok(report)
    }

    async fn verify_table(
        &self,
        table: &str,
        attempts: u32,
    ) -> Result<TableVerification, VerifyError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let (source, target) = self.checksums(table).await?;
            if source == target {
                debug!(table, attempt, checksum = %source, "Table consistent");
                return Ok(TableVerification {
                    table: table.to_string(),
                    attempts: attempt,
                    checksum: source,
                });
            }

            if attempt >= attempts {
                return Err(VerifyError::ChecksumMismatch {
                    source_schema: self.source.schema().to_string(),
                    target_schema: self.target.schema().to_string(),
                    table: table.to_string(),
                    source_checksum: source,
                    target_checksum: target,
                });
            }

            warn!(
                table,
                attempt,
                "Checksums differ (source {}, target {}), retrying in {:?}",
                source,
                target,
                self.interval
            );
            tokio::time::sleep(self.interval).await;
        }
    }

    async fn checksums(&self, table: &str) -> Result<(Checksum, Checksum), VerifyError> {
        let source = self.source.checksum(table).await?;
        let target = self.target.checksum(table).await?;
        Ok((source, target))
    }
}
