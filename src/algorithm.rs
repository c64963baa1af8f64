//! Symmetric algorithm tags
//!
//! The tag is never stored in the ciphertext; sender and recipient agree
//! on it out of band, exactly like the password.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCategory, ErrorKind, Result, SealnoteError};

/// Closed set of supported algorithms.
///
/// Every dispatch site matches exhaustively, so adding or removing a
/// variant fails to compile until each of them is revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    /// AES-256 in CBC mode with PKCS#7 padding.
    #[default]
    Aes256,
    /// Labelled "ChaCha20" for compatibility with existing ciphertexts; the
    /// primitive is the Rabbit stream cipher.
    ChaCha20,
    /// Three-key 3DES (EDE) in CBC mode with PKCS#7 padding.
    TripleDes,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Aes256, Algorithm::ChaCha20, Algorithm::TripleDes];

    /// Canonical tag, as shown to users and written to config files.
    pub fn tag(self) -> &'static str {
        match self {
            Algorithm::Aes256 => "AES-256",
            Algorithm::ChaCha20 => "ChaCha20",
            Algorithm::TripleDes => "TripleDES",
        }
    }

    /// Name of the primitive that actually runs.
    pub fn primitive_name(self) -> &'static str {
        match self {
            Algorithm::Aes256 => "AES-256-CBC",
            Algorithm::ChaCha20 => "Rabbit",
            Algorithm::TripleDes => "DES-EDE3-CBC",
        }
    }

    /// Key length in bytes.
    pub fn key_len(self) -> usize {
        match self {
            Algorithm::Aes256 => 32,
            Algorithm::ChaCha20 => 16,
            Algorithm::TripleDes => 24,
        }
    }

    /// IV length in bytes.
    pub fn iv_len(self) -> usize {
        match self {
            Algorithm::Aes256 => 16,
            Algorithm::ChaCha20 => 8,
            Algorithm::TripleDes => 8,
        }
    }

    /// Resolves a tag, falling back to AES-256 for anything unrecognized.
    ///
    /// For collaborators that carry the tag as free text. Use
    /// [`str::parse`] when an unknown tag should be an error instead.
    pub fn from_tag_or_default(tag: &str) -> Algorithm {
        match tag.parse() {
            Ok(algorithm) => algorithm,
            Err(_) => {
                tracing::debug!(tag, "unknown algorithm tag, using AES-256");
                Algorithm::default()
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Algorithm {
    type Err = SealnoteError;

    /// Case-insensitive; `-` and `_` are ignored, so `aes256`, `AES_256`
    /// and `AES-256` are equivalent.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "aes256" | "aes" => Ok(Algorithm::Aes256),
            "chacha20" | "chacha" | "rabbit" => Ok(Algorithm::ChaCha20),
            "tripledes" | "3des" | "desede3" => Ok(Algorithm::TripleDes),
            _ => Err(SealnoteError::with_kind(
                ErrorCategory::User,
                ErrorKind::UnknownAlgorithm,
                format!(
                    "unknown algorithm '{}'; expected one of AES-256, ChaCha20, TripleDES",
                    s
                ),
            )),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = SealnoteError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.tag().to_string()
    }
}
