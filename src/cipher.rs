//! Primitive dispatch
//!
//! Maps an [`Algorithm`] to its cipher and runs it over raw bytes with an
//! already-derived key and IV.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};
use des::TdesEde3;
use rabbit::Rabbit;

use crate::algorithm::Algorithm;
use crate::error::{ErrorCategory, ErrorKind, Result, SealnoteError};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type TdesCbcEnc = cbc::Encryptor<TdesEde3>;
type TdesCbcDec = cbc::Decryptor<TdesEde3>;

/// Encrypt `plaintext` under `algorithm`.
pub(crate) fn seal(algorithm: Algorithm, key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    match algorithm {
        Algorithm::Aes256 => {
            let enc = Aes256CbcEnc::new_from_slices(key, iv)
                .map_err(|_| key_iv_error(algorithm, ErrorKind::EncodingFailed))?;
            Ok(enc.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
        }
        Algorithm::TripleDes => {
            let enc = TdesCbcEnc::new_from_slices(key, iv)
                .map_err(|_| key_iv_error(algorithm, ErrorKind::EncodingFailed))?;
            Ok(enc.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
        }
        Algorithm::ChaCha20 => {
            let mut buf = plaintext.to_vec();
            apply_rabbit(key, iv, &mut buf, ErrorKind::EncodingFailed)?;
            Ok(buf)
        }
    }
}

/// Decrypt `ciphertext` under `algorithm`.
///
/// Block modes fail on bad length or padding. The stream mode cannot fail
/// on content: a wrong key simply yields different bytes.
pub(crate) fn open(algorithm: Algorithm, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    match algorithm {
        Algorithm::Aes256 => {
            let dec = Aes256CbcDec::new_from_slices(key, iv)
                .map_err(|_| key_iv_error(algorithm, ErrorKind::DecryptionFailed))?;
            dec.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                .map_err(|_| padding_error(algorithm))
        }
        Algorithm::TripleDes => {
            let dec = TdesCbcDec::new_from_slices(key, iv)
                .map_err(|_| key_iv_error(algorithm, ErrorKind::DecryptionFailed))?;
            dec.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                .map_err(|_| padding_error(algorithm))
        }
        Algorithm::ChaCha20 => {
            let mut buf = ciphertext.to_vec();
            apply_rabbit(key, iv, &mut buf, ErrorKind::DecryptionFailed)?;
            Ok(buf)
        }
    }
}

fn apply_rabbit(key: &[u8], iv: &[u8], buf: &mut [u8], kind: ErrorKind) -> Result<()> {
    let mut cipher =
        Rabbit::new_from_slices(key, iv).map_err(|_| key_iv_error(Algorithm::ChaCha20, kind))?;
    cipher.try_apply_keystream(buf).map_err(|_| {
        SealnoteError::with_kind(
            ErrorCategory::Internal,
            kind,
            "Rabbit keystream exhausted",
        )
    })
}

fn key_iv_error(algorithm: Algorithm, kind: ErrorKind) -> SealnoteError {
    SealnoteError::with_kind(
        ErrorCategory::Internal,
        kind,
        format!("invalid key or IV length for {}", algorithm.primitive_name()),
    )
}

fn padding_error(algorithm: Algorithm) -> SealnoteError {
    SealnoteError::with_kind(
        ErrorCategory::User,
        ErrorKind::DecryptionFailed,
        format!(
            "{} rejected the ciphertext (bad length or padding)",
            algorithm.primitive_name()
        ),
    )
}
