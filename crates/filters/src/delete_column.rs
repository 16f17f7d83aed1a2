//! Removes configured columns from DML events.
//!
//! ```toml
//! [[filters]]
//! type = "delete-dml-column"
//! match-schema = "test"
//! match-table = "test_table"
//! columns = ["e", "f"]
//! ```

use crate::error::FilterError;
use crate::filter::{Filter, FilterOutcome};
use crate::matcher::EventMatcher;
use sync_core::ChangeEvent;

pub const DELETE_DML_COLUMN: &str = "delete-dml-column";

const COLUMNS_KEY: &str = "columns";

/// Field redaction: deletes the configured columns from the current row,
/// the prior row and the primary-key map of matching events.
#[derive(Debug, Clone)]
pub struct DeleteDmlColumnFilter {
    matcher: EventMatcher,
    columns: Vec<String>,
}

impl DeleteDmlColumnFilter {
    pub fn new(matcher: EventMatcher, columns: Vec<String>) -> Result<Self, FilterError> {
        if columns.is_empty() {
            return Err(FilterError::Config(format!(
                "\"{COLUMNS_KEY}\" must name at least one column"
            )));
        }
        Ok(Self { matcher, columns })
    }

    pub fn from_config(config: &toml::Table) -> Result<Self, FilterError> {
        let matcher = EventMatcher::from_config(config)?;
        let columns = config
            .get(COLUMNS_KEY)
            .ok_or_else(|| FilterError::Config(format!("\"{COLUMNS_KEY}\" is not configured")))?
            .as_array()
            .ok_or_else(not_string_array)?
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(not_string_array))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(matcher, columns)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

fn not_string_array() -> FilterError {
    FilterError::Config(format!("\"{COLUMNS_KEY}\" should be an array of strings"))
}

impl Filter for DeleteDmlColumnFilter {
    fn kind(&self) -> &'static str {
        DELETE_DML_COLUMN
    }

    fn apply(&self, event: &mut ChangeEvent) -> Result<FilterOutcome, FilterError> {
        if !self.matcher.matches(event) {
            return Ok(FilterOutcome::Continue);
        }

        let Some(dml) = event.dml.as_mut() else {
            return Err(FilterError::MalformedEvent {
                schema: event.schema.clone(),
                table: event.table.clone(),
                reason: "event has no DML payload".into(),
            });
        };

        for column in &self.columns {
            dml.data.remove(column);
            if let Some(old) = dml.old.as_mut() {
                old.remove(column);
            }
            if let Some(pks) = dml.pks.as_mut() {
                pks.remove(column);
            }
        }
        Ok(FilterOutcome::Continue)
    }
}
