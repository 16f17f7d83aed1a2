//! The filter interface.

use crate::error::FilterError;
use sync_core::ChangeEvent;

/// What the pipeline should do after a filter ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Pass the event to the next filter.
    Continue,
    /// Drop the event; later filters do not see it.
    Stop,
}

/// A stateless in-place transformation of change events.
pub trait Filter: Send + Sync {
    /// Registered kind name, as used in the `type` config key.
    fn kind(&self) -> &'static str;

    fn apply(&self, event: &mut ChangeEvent) -> Result<FilterOutcome, FilterError>;
}
