//! Timestamp value generators.

use chrono::{DateTime, Utc};
use rand::Rng;
use sync_core::UniversalValue;

/// MySQL literal format with microsecond precision.
pub const MYSQL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Generate a random timestamp with microsecond precision between the two
/// unix timestamps (seconds, inclusive), rendered as a MySQL literal.
pub fn generate_timestamp_range<R: Rng + ?Sized>(
    rng: &mut R,
    start_secs: i64,
    end_secs: i64,
) -> UniversalValue {
    let secs = if start_secs >= end_secs {
        start_secs
    } else {
        rng.random_range(start_secs..=end_secs)
    };
    let micros: u32 = rng.random_range(0..1_000_000);
    let dt: DateTime<Utc> = DateTime::from_timestamp(secs, micros * 1_000).unwrap_or_default();
    UniversalValue::String(dt.format(MYSQL_DATETIME_FORMAT).to_string())
}
