//! Convergence verifier for sync-stress.
//!
//! After the workload stops, replication should bring the target schema to
//! the same state as the source. This crate checks that table by table by
//! comparing store-computed checksums, giving lagging tables a few seconds
//! to catch up.
//!
//! # Example
//!
//! ```ignore
//! use loadtest_verify::{ConsistencyVerifier, ExecutorChecksumSource};
//!
//! let verifier = ConsistencyVerifier::new(
//!     Box::new(ExecutorChecksumSource::new(source, "source_db")),
//!     Box::new(ExecutorChecksumSource::new(target, "target_db")),
//! );
//! let report = verifier.verify(&registry.table_names()).await?;
//! ```

pub mod checksum;
pub mod error;
pub mod report;
pub mod verifier;

pub use checksum::{Checksum, ChecksumSource, ExecutorChecksumSource};
pub use error::VerifyError;
pub use report::{TableVerification, VerificationReport};
pub use verifier::{ConsistencyVerifier, DEFAULT_ATTEMPTS, DEFAULT_INTERVAL};
