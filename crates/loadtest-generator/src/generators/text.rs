//! String and binary value generators.

use rand::distr::Alphanumeric;
use rand::Rng;
use sync_core::UniversalValue;

/// Generate an alphanumeric string with a length in `0..=max_len`.
pub fn generate_alphanumeric<R: Rng + ?Sized>(rng: &mut R, max_len: usize) -> UniversalValue {
    let len = rng.random_range(0..=max_len);
    let text: String = (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect();
    UniversalValue::String(text)
}

/// Generate random bytes with a length in `0..=max_len`.
pub fn generate_bytes<R: Rng + ?Sized>(rng: &mut R, max_len: usize) -> UniversalValue {
    let len = rng.random_range(0..=max_len);
    let mut bytes = vec![0u8; len];
    rng.fill(bytes.as_mut_slice());
    UniversalValue::Bytes(bytes)
}
