//! Conversions between `UniversalValue` and `mysql_async::Value`.

use mysql_async::{Params, Value};
use sync_core::UniversalValue;

/// Convert a universal value into a MySQL parameter value.
pub fn to_mysql(value: &UniversalValue) -> Value {
    match value {
        UniversalValue::Null => Value::NULL,
        UniversalValue::Bool(b) => Value::Int(i64::from(*b)),
        UniversalValue::Int64(i) => Value::Int(*i),
        UniversalValue::UInt64(u) => Value::UInt(*u),
        UniversalValue::Float64(f) => Value::Double(*f),
        UniversalValue::String(s) => Value::Bytes(s.clone().into_bytes()),
        UniversalValue::Bytes(b) => Value::Bytes(b.clone()),
        // Bound as JSON text.
        UniversalValue::Array(_) | UniversalValue::Object(_) => {
            Value::Bytes(value.to_string().into_bytes())
        }
    }
}

/// Convert a MySQL result value into a universal value.
///
/// Text-protocol results arrive as bytes; valid UTF-8 is returned as a
/// string, anything else as raw bytes. Temporal values are rendered as
/// MySQL literals.
pub fn from_mysql(value: Value) -> UniversalValue {
    match value {
        Value::NULL => UniversalValue::Null,
        Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(s) => UniversalValue::String(s),
            Err(e) => UniversalValue::Bytes(e.into_bytes()),
        },
        Value::Int(i) => UniversalValue::Int64(i),
        Value::UInt(u) => UniversalValue::UInt64(u),
        Value::Float(f) => UniversalValue::Float64(f as f64),
        Value::Double(f) => UniversalValue::Float64(f),
        Value::Date(year, month, day, hour, minute, second, micros) => UniversalValue::String(
            format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{micros:06}"),
        ),
        Value::Time(negative, days, hours, minutes, seconds, micros) => {
            let sign = if negative { "-" } else { "" };
            let hours = days * 24 + hours as u32;
            UniversalValue::String(format!(
                "{sign}{hours:02}:{minutes:02}:{seconds:02}.{micros:06}"
            ))
        }
    }
}

/// Build positional parameters for a statement.
pub fn to_params(args: &[UniversalValue]) -> Params {
    if args.is_empty() {
        Params::Empty
    } else {
        Params::Positional(args.iter().map(to_mysql).collect())
    }
}
