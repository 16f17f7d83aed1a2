//! Change-event filters.
//!
//! Filters rewrite captured change events in place before they are applied
//! to the target. They are configured as `[[filters]]` tables in TOML, each
//! naming its kind with `type` and selecting events with optional
//! `match-schema` / `match-table` glob patterns.
//!
//! Supported kinds:
//!
//! - `delete-dml-column` ([`DeleteDmlColumnFilter`]) - drop columns from
//!   the row data, prior row and primary-key map

pub mod delete_column;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod pipeline;
pub mod registry;

pub use delete_column::{DeleteDmlColumnFilter, DELETE_DML_COLUMN};
pub use error::FilterError;
pub use filter::{Filter, FilterOutcome};
pub use matcher::EventMatcher;
pub use pipeline::FilterPipeline;
pub use registry::{build_filter, filter_kinds};
