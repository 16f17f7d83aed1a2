//! Numeric value generators.

use rand::Rng;
use sync_core::UniversalValue;

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> UniversalValue {
    UniversalValue::Int64(rng.random_range(min..=max))
}

/// Generate a random unsigned integer in the given range (inclusive).
pub fn generate_uint_range<R: Rng + ?Sized>(rng: &mut R, min: u64, max: u64) -> UniversalValue {
    UniversalValue::UInt64(rng.random_range(min..=max))
}

/// Generate a float with exactly `scale` fractional digits whose absolute
/// integer part stays below `10^int_digits`.
///
/// Values are built from an integer count of `10^-scale` units so that the
/// stored value survives a `FLOAT(M,D)` / `DOUBLE(M,D)` column unchanged.
pub fn generate_scaled_float<R: Rng + ?Sized>(
    rng: &mut R,
    int_digits: u32,
    scale: u32,
) -> UniversalValue {
    let units = scaled_units(rng, int_digits, scale);
    UniversalValue::Float64(units as f64 / 10_f64.powi(scale as i32))
}

/// Generate a fixed-point decimal rendered as text, e.g. `-1234.567`.
pub fn generate_decimal<R: Rng + ?Sized>(rng: &mut R, int_digits: u32, scale: u32) -> UniversalValue {
    let units = scaled_units(rng, int_digits, scale);
    let divisor = 10_i64.pow(scale);
    let sign = if units < 0 { "-" } else { "" };
    let abs = units.unsigned_abs();
    let text = if scale == 0 {
        format!("{sign}{abs}")
    } else {
        format!(
            "{sign}{}.{:0width$}",
            abs / divisor as u64,
            abs % divisor as u64,
            width = scale as usize
        )
    };
    UniversalValue::String(text)
}

fn scaled_units<R: Rng + ?Sized>(rng: &mut R, int_digits: u32, scale: u32) -> i64 {
    let bound = 10_i64.pow(int_digits + scale) - 1;
    rng.random_range(-bound..=bound)
}
