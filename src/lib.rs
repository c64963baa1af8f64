//! Sealnote - password-based text message encryption
//!
//! Messages are encrypted under a shared password with one of three
//! algorithms and armored into a single base64 string in the OpenSSL
//! "salted" format, readable by CryptoJS-based clients.
//!
//! ```
//! use sealnote::{Algorithm, decrypt_message, encrypt_message};
//!
//! let ciphertext = encrypt_message("Hello, 世界! 🔐", "correct-horse-42", Algorithm::Aes256)?;
//! let plaintext = decrypt_message(&ciphertext, "correct-horse-42", Algorithm::Aes256)?;
//! assert_eq!(plaintext, "Hello, 世界! 🔐");
//! # Ok::<(), sealnote::SealnoteError>(())
//! ```

#![forbid(unsafe_code)]

pub mod algorithm;
pub mod armor;
mod cipher;
pub mod codec;
pub mod config;
pub mod error;
pub mod file_ops;
mod kdf;
pub mod keygen;
pub mod message;
pub mod passphrase;
pub mod strength;
pub mod validate;

pub use algorithm::Algorithm;
pub use error::{ErrorCategory, ErrorKind, Result, SealnoteError};
pub use keygen::{generate_strong_key, generate_strong_key_with_rng};
pub use message::{
    DecryptionRequest, EncryptionRequest, check_password_strength, decrypt_message,
    encrypt_message, encrypt_message_with_rng,
};
pub use strength::{StrengthLevel, StrengthScore, score_password_strength};
