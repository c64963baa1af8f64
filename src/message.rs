//! Validated encrypt/decrypt entry points
//!
//! Both directions validate their request first and only then call into
//! the codec, so no primitive ever sees an empty message, a missing key
//! or a malformed ciphertext.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::algorithm::Algorithm;
use crate::codec;
use crate::error::Result;
use crate::strength::score_password_strength;
use crate::validate;

/// A message to encrypt.
#[derive(Debug, Clone, Copy)]
pub struct EncryptionRequest<'a> {
    pub plaintext: &'a str,
    pub password: &'a str,
    pub algorithm: Algorithm,
}

impl<'a> EncryptionRequest<'a> {
    pub fn new(plaintext: &'a str, password: &'a str, algorithm: Algorithm) -> Self {
        Self {
            plaintext,
            password,
            algorithm,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate::validate_encrypt_request(self)
    }
}

/// A ciphertext to decrypt.
#[derive(Debug, Clone, Copy)]
pub struct DecryptionRequest<'a> {
    pub ciphertext: &'a str,
    pub password: &'a str,
    pub algorithm: Algorithm,
}

impl<'a> DecryptionRequest<'a> {
    pub fn new(ciphertext: &'a str, password: &'a str, algorithm: Algorithm) -> Self {
        Self {
            ciphertext,
            password,
            algorithm,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate::validate_decrypt_request(self)
    }
}

/// Encrypt `message` under `password`, returning the armored ciphertext.
pub fn encrypt_message(message: &str, password: &str, algorithm: Algorithm) -> Result<String> {
    encrypt_message_with_rng(message, password, algorithm, &mut OsRng)
}

/// Like [`encrypt_message`], drawing the salt from `rng`.
pub fn encrypt_message_with_rng<R: RngCore + CryptoRng>(
    message: &str,
    password: &str,
    algorithm: Algorithm,
    rng: &mut R,
) -> Result<String> {
    let request = EncryptionRequest::new(message, password, algorithm);
    request.validate()?;

    codec::encode_with_rng(request.plaintext, request.password, request.algorithm, rng)
        .map_err(|e| {
            let msg = format!("Encryption failed: {}", e);
            e.with_context(msg)
        })
}

/// Decrypt an armored `ciphertext` under `password`.
///
/// Surrounding whitespace is ignored. Every failure after validation is
/// reported as [`crate::ErrorKind::DecryptionFailed`], including a decode
/// that yields an empty message.
pub fn decrypt_message(ciphertext: &str, password: &str, algorithm: Algorithm) -> Result<String> {
    let request = DecryptionRequest::new(ciphertext, password, algorithm);
    request.validate()?;

    let plaintext = codec::decode(request.ciphertext.trim(), request.password, request.algorithm)
        .map_err(validate::classify_decode_failure)?;
    if plaintext.is_empty() {
        tracing::debug!(algorithm = %algorithm, "decryption produced an empty message");
        return Err(validate::empty_decryption());
    }
    Ok(plaintext)
}

/// Advisory strength of `password`, 0 to 100.
pub fn check_password_strength(password: &str) -> u8 {
    score_password_strength(password).value()
}
