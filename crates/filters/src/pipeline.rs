//! Ordered chain of filters built from a TOML config file.

use crate::error::FilterError;
use crate::filter::{Filter, FilterOutcome};
use crate::registry::build_filter;
use serde::Deserialize;
use std::path::Path;
use sync_core::ChangeEvent;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct PipelineConfig {
    #[serde(default)]
    filters: Vec<toml::Table>,
}

/// Runs filters in configuration order.
#[derive(Default)]
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new(filters: Vec<Box<dyn Filter>>) -> Self {
        Self { filters }
    }

    /// Build from a TOML document with one `[[filters]]` table per filter.
    pub fn from_toml(content: &str) -> Result<Self, FilterError> {
        let config: PipelineConfig =
            toml::from_str(content).map_err(|e| FilterError::Config(e.to_string()))?;
        let filters = config
            .filters
            .iter()
            .map(build_filter)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Built filter pipeline with {} filters", filters.len());
        Ok(Self { filters })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FilterError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FilterError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply every filter to `event` in order.
    ///
    /// Returns `Stop` as soon as a filter asks to drop the event. The event
    /// may have been partially modified when an error is returned.
    pub fn apply(&self, event: &mut ChangeEvent) -> Result<FilterOutcome, FilterError> {
        for filter in &self.filters {
            if filter.apply(event)? == FilterOutcome::Stop {
                debug!(
                    filter = filter.kind(),
                    schema = %event.schema,
                    table = %event.table,
                    "Event dropped"
                );
                return Ok(FilterOutcome::Stop);
            }
        }
        Ok(FilterOutcome::Continue)
    }
}
