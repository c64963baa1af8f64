//! Request validation and failure classification
//!
//! Validation runs before any primitive is touched. Classification turns
//! whatever went wrong inside decoding into one stable, user-facing error.

use crate::error::{ErrorCategory, ErrorKind, Result, SealnoteError};
use crate::message::{DecryptionRequest, EncryptionRequest};

/// Minimum password length, in characters.
pub const MIN_KEY_CHARS: usize = 4;

pub const EMPTY_MESSAGE_MSG: &str = "Input Error: Your message cannot be empty.";
pub const MISSING_KEY_ENCRYPT_MSG: &str =
    "Security Error: A decryption key is required to secure your message.";
pub const WEAK_KEY_MSG: &str =
    "Weak Key: Please use a password with at least 4 characters for basic safety.";
pub const MISSING_INPUT_MSG: &str =
    "Input Required: Please paste the encrypted text you want to unlock.";
pub const MISSING_KEY_DECRYPT_MSG: &str =
    "Key Missing: Decryption requires the secret password used to lock the message.";
pub const MALFORMED_CIPHERTEXT_MSG: &str =
    "Malformed ciphertext: The input contains invalid characters for an encrypted message.";
pub const DECRYPTION_FAILED_MSG: &str =
    "Decryption failed: Incorrect key, wrong algorithm selected, or the message is corrupted.";

pub fn validate_encrypt_request(request: &EncryptionRequest<'_>) -> Result<()> {
    if request.plaintext.trim().is_empty() {
        return Err(rejected(ErrorKind::EmptyMessage, EMPTY_MESSAGE_MSG));
    }
    if request.password.is_empty() {
        return Err(rejected(ErrorKind::MissingKey, MISSING_KEY_ENCRYPT_MSG));
    }
    if request.password.chars().count() < MIN_KEY_CHARS {
        return Err(rejected(ErrorKind::WeakKey, WEAK_KEY_MSG));
    }
    Ok(())
}

pub fn validate_decrypt_request(request: &DecryptionRequest<'_>) -> Result<()> {
    let ciphertext = request.ciphertext.trim();
    if ciphertext.is_empty() {
        return Err(rejected(ErrorKind::MissingInput, MISSING_INPUT_MSG));
    }
    if request.password.is_empty() {
        return Err(rejected(ErrorKind::MissingKey, MISSING_KEY_DECRYPT_MSG));
    }
    if !has_ciphertext_shape(ciphertext) {
        return Err(rejected(
            ErrorKind::MalformedCiphertext,
            MALFORMED_CIPHERTEXT_MSG,
        ));
    }
    Ok(())
}

/// True if `s` is non-empty and made only of `[A-Za-z0-9+/=]`.
///
/// Necessary, not sufficient: a string passing this check may still fail
/// to decode.
pub fn has_ciphertext_shape(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
}

/// Collapse any decode failure into [`ErrorKind::DecryptionFailed`].
///
/// The original error is kept as the source; its message is not shown to
/// the user.
pub fn classify_decode_failure(err: SealnoteError) -> SealnoteError {
    tracing::debug!(cause = %err, "decryption failed");
    err.reclassify(ErrorKind::DecryptionFailed, DECRYPTION_FAILED_MSG)
}

/// The error for a decode that produced an empty message.
pub fn empty_decryption() -> SealnoteError {
    SealnoteError::with_kind(
        ErrorCategory::User,
        ErrorKind::DecryptionFailed,
        DECRYPTION_FAILED_MSG,
    )
}

fn rejected(kind: ErrorKind, msg: &str) -> SealnoteError {
    SealnoteError::with_kind(ErrorCategory::User, kind, msg)
}
