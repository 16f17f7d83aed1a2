//! Verification report types.

use crate::checksum::Checksum;
use std::time::Duration;

/// Outcome for one table that converged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableVerification {
    pub table: String,
    /// Comparisons made, including the final matching one.
    pub attempts: u32,
    pub checksum: Checksum,
}

/// Outcome of a successful verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub tables: Vec<TableVerification>,
    pub total_duration: Duration,
}

impl VerificationReport {
    /// Tables that needed more than one comparison to converge.
    pub fn lagging_tables(&self) -> impl Iterator<Item = &TableVerification> {
        self.tables.iter().filter(|t| t.attempts > 1)
    }
}
