//! Schema and table matching shared by all filters.

use crate::error::FilterError;
use glob::Pattern;
use sync_core::ChangeEvent;

pub const MATCH_SCHEMA_KEY: &str = "match-schema";
pub const MATCH_TABLE_KEY: &str = "match-table";

/// Selects the events a filter applies to.
///
/// Each side is a list of glob patterns (`*`, `?`, `[...]`); a name matches
/// when any pattern matches. An absent key matches every name.
#[derive(Debug, Clone, Default)]
pub struct EventMatcher {
    schemas: Option<Vec<Pattern>>,
    tables: Option<Vec<Pattern>>,
}

impl EventMatcher {
    /// Read `match-schema` and `match-table` from a filter's config table.
    /// Each key takes a single pattern or an array of patterns.
    pub fn from_config(config: &toml::Table) -> Result<Self, FilterError> {
        Ok(Self {
            schemas: patterns(config, MATCH_SCHEMA_KEY)?,
            tables: patterns(config, MATCH_TABLE_KEY)?,
        })
    }

    pub fn matches(&self, event: &ChangeEvent) -> bool {
        matches_any(&self.schemas, &event.schema) && matches_any(&self.tables, &event.table)
    }
}

fn matches_any(patterns: &Option<Vec<Pattern>>, name: &str) -> bool {
    match patterns {
        Some(patterns) => patterns.iter().any(|p| p.matches(name)),
        None => true,
    }
}

fn patterns(config: &toml::Table, key: &str) -> Result<Option<Vec<Pattern>>, FilterError> {
    let raw: Vec<&str> = match config.get(key) {
        None => return Ok(None),
        Some(toml::Value::String(s)) => vec![s.as_str()],
        Some(toml::Value::Array(values)) => values
            .iter()
            .map(|v| {
                v.as_str().ok_or_else(|| {
                    FilterError::Config(format!("\"{key}\" should be an array of strings"))
                })
            })
            .collect::<Result<_, _>>()?,
        Some(_) => {
            return Err(FilterError::Config(format!(
                "\"{key}\" should be a string or an array of strings"
            )))
        }
    };

    raw.into_iter()
        .map(|p| {
            Pattern::new(p)
                .map_err(|e| FilterError::Config(format!("invalid pattern \"{p}\" in \"{key}\": {e}")))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
