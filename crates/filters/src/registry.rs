//! Kind name to constructor mapping.

use crate::delete_column::{DeleteDmlColumnFilter, DELETE_DML_COLUMN};
use crate::error::FilterError;
use crate::filter::Filter;

pub const TYPE_KEY: &str = "type";

type Constructor = fn(&toml::Table) -> Result<Box<dyn Filter>, FilterError>;

/// Every filter kind that can be named in a config file.
static FILTER_KINDS: &[(&str, Constructor)] = &[(DELETE_DML_COLUMN, |config| {
    Ok(Box::new(DeleteDmlColumnFilter::from_config(config)?))
})];

/// Names of all registered filter kinds.
pub fn filter_kinds() -> impl Iterator<Item = &'static str> {
    FILTER_KINDS.iter().map(|(name, _)| *name)
}

/// Build a filter from its config table, dispatching on the `type` key.
pub fn build_filter(config: &toml::Table) -> Result<Box<dyn Filter>, FilterError> {
    let kind = config
        .get(TYPE_KEY)
        .and_then(toml::Value::as_str)
        .ok_or_else(|| FilterError::Config(format!("\"{TYPE_KEY}\" is not configured")))?;

    let (_, constructor) = FILTER_KINDS
        .iter()
        .find(|(name, _)| *name == kind)
        .ok_or_else(|| FilterError::Config(format!("unknown filter type \"{kind}\"")))?;
    constructor(config)
}
