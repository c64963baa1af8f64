//! Random password generation

use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Alphabet generated keys are drawn from.
pub const KEY_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+";

pub const DEFAULT_KEY_LENGTH: usize = 32;

/// Generate a `length`-character key using the OS random source.
pub fn generate_strong_key(length: usize) -> Zeroizing<String> {
    generate_strong_key_with_rng(length, &mut OsRng)
}

/// Generate a `length`-character key, each character sampled uniformly
/// from [`KEY_CHARSET`].
pub fn generate_strong_key_with_rng<R: RngCore + CryptoRng>(
    length: usize,
    rng: &mut R,
) -> Zeroizing<String> {
    let index = Uniform::from(0..KEY_CHARSET.len());
    let mut key = Zeroizing::new(String::with_capacity(length));
    for _ in 0..length {
        key.push(char::from(KEY_CHARSET[index.sample(rng)]));
    }
    key
}
