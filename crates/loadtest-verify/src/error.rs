//! Error types for the verifier.

use crate::checksum::Checksum;
use sync_core::ExecutorError;
use thiserror::Error;

/// Errors that can occur during verification.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The checksum query itself failed.
    #[error("Checksum query failed for '{schema}.{table}': {source}")]
    Query {
        schema: String,
        table: String,
        source: ExecutorError,
    },

    /// The store answered with something that is not a checksum row.
    #[error("Unexpected checksum result for '{schema}.{table}': {detail}")]
    UnexpectedResult {
        schema: String,
        table: String,
        detail: String,
    },

    /// Source and target never converged within the attempt budget.
    #[error(
        "Checksum mismatch for table '{table}': source '{source_schema}' = {source_checksum}, \
         target '{target_schema}' = {target_checksum}"
    )]
    ChecksumMismatch {
        source_schema: String,
        target_schema: String,
        table: String,
        source_checksum: Checksum,
        target_checksum: Checksum,
    },
}
