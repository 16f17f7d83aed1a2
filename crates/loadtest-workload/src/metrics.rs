//! Counters reported by the seed and mutation phases.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Result of the seed phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedMetrics {
    /// Seed batches executed.
    pub tasks: u64,
    /// Rows inserted across all tables.
    pub rows_inserted: u64,
    pub duration: Duration,
}

/// Live counters shared by all workers of the mutation phase.
#[derive(Debug, Default)]
pub struct WorkloadMetrics {
    committed: AtomicU64,
    failed_attempts: AtomicU64,
    statements: AtomicU64,
}

impl WorkloadMetrics {
    pub(crate) fn record_commit(&self, statements: usize) {
        self.committed.fetch_add(1, Ordering::Relaxed);
        self.statements
            .fetch_add(statements as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_failed_attempt(&self) {
        self.failed_attempts.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> WorkloadSummary {
        WorkloadSummary {
            committed: self.committed.load(Ordering::Relaxed),
            failed_attempts: self.failed_attempts.load(Ordering::Relaxed),
            statements: self.statements.load(Ordering::Relaxed),
        }
    }
}

/// Totals of the mutation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkloadSummary {
    /// Committed transactions.
    pub committed: u64,
    /// Attempts that were rolled back (conflicts, deadlocks, commit errors).
    pub failed_attempts: u64,
    /// Statements inside committed transactions.
    pub statements: u64,
}
