//! Error types for change-event filters.

use thiserror::Error;

/// Errors that can occur while building or applying filters.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Invalid filter configuration.
    #[error("Filter configuration error: {0}")]
    Config(String),

    /// An event lacks a part the filter needs.
    #[error("Malformed event for '{schema}.{table}': {reason}")]
    MalformedEvent {
        schema: String,
        table: String,
        reason: String,
    },
}
