//! Password-based encode/decode of text messages
//!
//! Encoding draws a fresh salt, derives key and IV from the password with
//! [`kdf::evp_bytes_to_key`], runs the algorithm's primitive and armors
//! the result. Decoding reverses each step and insists on UTF-8 output.
//!
//! Nothing here validates the request; see [`crate::validate`].

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::algorithm::Algorithm;
use crate::armor::{self, SALT_LEN};
use crate::cipher;
use crate::error::{ErrorCategory, ErrorKind, Result, SealnoteError};
use crate::kdf;

/// Encode `plaintext` under `password` with a salt drawn from the OS.
pub fn encode(plaintext: &str, password: &str, algorithm: Algorithm) -> Result<String> {
    encode_with_rng(plaintext, password, algorithm, &mut OsRng)
}

/// Encode `plaintext` under `password` with a salt drawn from `rng`.
pub fn encode_with_rng<R: RngCore + CryptoRng>(
    plaintext: &str,
    password: &str,
    algorithm: Algorithm,
    rng: &mut R,
) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    rng.try_fill_bytes(&mut salt).map_err(|e| {
        SealnoteError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::EncodingFailed,
            "random source failed while generating salt",
            e,
        )
    })?;

    encode_with_salt(plaintext, password, algorithm, &salt)
}

/// Encode `plaintext` under `password` using the provided salt
///
/// This function is ONLY for testing purposes to generate deterministic output.
/// NEVER use this in production - always use `encode()` which generates a random salt.
pub fn encode_with_salt(
    plaintext: &str,
    password: &str,
    algorithm: Algorithm,
    salt: &[u8; SALT_LEN],
) -> Result<String> {
    let derived = kdf::evp_bytes_to_key(
        password.as_bytes(),
        salt,
        algorithm.key_len(),
        algorithm.iv_len(),
    );
    let body = cipher::seal(algorithm, &derived.key, &derived.iv, plaintext.as_bytes())?;
    let armored = armor::wrap(salt, &body);

    // The envelope alone is non-empty, so this only trips on a broken armor.
    if armored.is_empty() {
        return Err(SealnoteError::with_kind(
            ErrorCategory::Internal,
            ErrorKind::EncodingFailed,
            "encryption resulted in empty output",
        ));
    }

    tracing::debug!(
        algorithm = %algorithm,
        primitive = algorithm.primitive_name(),
        len = armored.len(),
        "encoded message"
    );
    Ok(armored)
}

/// Decode an armored `ciphertext` under `password`
///
/// Returns the recovered text exactly, including an empty string.
pub fn decode(ciphertext: &str, password: &str, algorithm: Algorithm) -> Result<String> {
    let (salt, body) = armor::unwrap(ciphertext)?;
    let derived = kdf::evp_bytes_to_key(
        password.as_bytes(),
        &salt,
        algorithm.key_len(),
        algorithm.iv_len(),
    );
    let plaintext = cipher::open(algorithm, &derived.key, &derived.iv, &body)?;

    String::from_utf8(plaintext).map_err(|e| {
        SealnoteError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::DecryptionFailed,
            "decrypted bytes are not valid UTF-8",
            e,
        )
    })
}
