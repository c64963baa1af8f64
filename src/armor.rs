//! Salted armoring for ciphertext bytes
//!
//! The armored format is the OpenSSL "salted" envelope:
//!
//! ```text
//! base64( "Salted__" || salt[8] || ciphertext )
//! ```
//!
//! The armored string:
//! - Uses only `[A-Za-z0-9+/=]` (standard base64, padded)
//! - Always begins with `U2FsdGVkX1`
//! - Carries no algorithm tag, version or MAC

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::error::{ErrorCategory, ErrorKind, Result, SealnoteError};

/// Length of salt in bytes
pub const SALT_LEN: usize = 8;

/// Magic marker preceding the salt
const SALTED_MAGIC: &[u8; 8] = b"Salted__";

/// Padded on output, padding optional on input.
const ARMOR_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Wrap salt and ciphertext bytes in armor, returning the armored string
pub fn wrap(salt: &[u8; SALT_LEN], body: &[u8]) -> String {
    let mut raw = Vec::with_capacity(SALTED_MAGIC.len() + SALT_LEN + body.len());
    raw.extend_from_slice(SALTED_MAGIC);
    raw.extend_from_slice(salt);
    raw.extend_from_slice(body);
    ARMOR_ENGINE.encode(raw)
}

/// Unwrap an armored string, returning the salt and the ciphertext bytes
pub fn unwrap(armored: &str) -> Result<([u8; SALT_LEN], Vec<u8>)> {
    let raw = ARMOR_ENGINE.decode(armored).map_err(|e| {
        SealnoteError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::DecryptionFailed,
            format!("base64 decoding failed: {}", e),
            e,
        )
    })?;

    let Some(rest) = raw.strip_prefix(SALTED_MAGIC.as_slice()) else {
        return Err(SealnoteError::with_kind(
            ErrorCategory::User,
            ErrorKind::DecryptionFailed,
            "input unrecognized as salted ciphertext",
        ));
    };

    if rest.len() < SALT_LEN {
        return Err(SealnoteError::with_kind(
            ErrorCategory::User,
            ErrorKind::DecryptionFailed,
            "input likely truncated while reading salt",
        ));
    }
    let (salt, body) = rest.split_at(SALT_LEN);
    let salt: [u8; SALT_LEN] = salt.try_into().map_err(|_| {
        SealnoteError::with_kind(
            ErrorCategory::Internal,
            ErrorKind::InternalInvariant,
            "salt slice has unexpected length",
        )
    })?;

    Ok((salt, body.to_vec()))
}
