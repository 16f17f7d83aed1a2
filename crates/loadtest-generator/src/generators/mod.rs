//! Column value generators.
//!
//! Each helper draws one column value from the caller's random source.
//! They are generic over `?Sized` RNGs so they can be driven through the
//! `&mut dyn RngCore` handed to a [`crate::TableDataGenerator`].

pub mod numeric;
pub mod text;
pub mod timestamp;

use rand::Rng;
use sync_core::UniversalValue;

/// Return NULL with probability `null_ratio`, otherwise the generated value.
pub fn nullable<R, F>(rng: &mut R, null_ratio: f64, generate: F) -> UniversalValue
where
    R: Rng + ?Sized,
    F: FnOnce(&mut R) -> UniversalValue,
{
    if rng.random_bool(null_ratio) {
        UniversalValue::Null
    } else {
        generate(rng)
    }
}
