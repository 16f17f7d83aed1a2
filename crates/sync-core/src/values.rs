//! Value representations shared by statements and change events.
//!
//! `UniversalValue` is the database-agnostic value carried both as a bound
//! statement argument and as a column value inside a [`crate::ChangeEvent`].
//! Executor crates convert it into their native parameter type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single column value.
///
/// Serialized untagged so that change events read and write plain JSON.
/// Variant order matters for deserialization: signed integers are tried
/// before unsigned ones, strings before byte arrays, and byte arrays before
/// general arrays. Nested JSON (document columns) is kept as `Array` or
/// `Object` so events pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniversalValue {
    /// SQL NULL / JSON null
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int64(i64),

    /// 64-bit unsigned integer (values above `i64::MAX`)
    UInt64(u64),

    /// 64-bit floating point
    Float64(f64),

    /// Text value. Decimals and datetimes are carried as text.
    String(String),

    /// Binary data
    Bytes(Vec<u8>),

    /// JSON array that is not a byte string
    Array(Vec<UniversalValue>),

    /// JSON object
    Object(BTreeMap<String, UniversalValue>),
}

impl UniversalValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            Self::UInt64(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// Try to get this value as a u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt64(u) => Some(*u),
            Self::Int64(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for UniversalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int64(i) => write!(f, "{i}"),
            Self::UInt64(u) => write!(f, "{u}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Self::Array(_) | Self::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<bool> for UniversalValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for UniversalValue {
    fn from(v: i32) -> Self {
        Self::Int64(v as i64)
    }
}

impl From<i64> for UniversalValue {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<u32> for UniversalValue {
    fn from(v: u32) -> Self {
        Self::UInt64(v as u64)
    }
}

impl From<u64> for UniversalValue {
    fn from(v: u64) -> Self {
        Self::UInt64(v)
    }
}

impl From<f64> for UniversalValue {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<String> for UniversalValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for UniversalValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<u8>> for UniversalValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl<T: Into<UniversalValue>> From<Option<T>> for UniversalValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Column name to value mapping, ordered by column name.
pub type Row = BTreeMap<String, UniversalValue>;
