//! Change-capture events flowing through the filter pipeline.

use crate::values::Row;
use serde::{Deserialize, Serialize};

/// Row-level payload of a DML change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DmlPayload {
    /// Current row state.
    pub data: Row,
    /// Prior row state, present only for updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<Row>,
    /// Primary-key columns of the row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pks: Option<Row>,
}

/// A change event captured from a source schema.
///
/// Events without a DML payload (DDL, heartbeats) carry `dml: None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub schema: String,
    pub table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dml: Option<DmlPayload>,
}

impl ChangeEvent {
    /// Create a DML change event.
    pub fn dml(schema: impl Into<String>, table: impl Into<String>, payload: DmlPayload) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            dml: Some(payload),
        }
    }

    /// Parse an event from a JSON line.
    pub fn from_json(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Serialize the event as a single JSON line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
