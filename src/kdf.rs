//! OpenSSL `EVP_BytesToKey` key derivation (MD5, one iteration)
//!
//! This is the derivation password-based CryptoJS ciphers use, which is
//! what keeps ciphertexts interchangeable with the web client. It is not a
//! slow KDF.

use md5::{Digest, Md5};
use zeroize::Zeroizing;

use crate::armor::SALT_LEN;

/// Key and IV derived from a password and salt.
pub(crate) struct DerivedKey {
    pub key: Zeroizing<Vec<u8>>,
    pub iv: Zeroizing<Vec<u8>>,
}

/// Derive `key_len + iv_len` bytes as
/// `D_1 = MD5(password || salt)`, `D_i = MD5(D_{i-1} || password || salt)`.
pub(crate) fn evp_bytes_to_key(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    key_len: usize,
    iv_len: usize,
) -> DerivedKey {
    let needed = key_len + iv_len;
    let mut material = Zeroizing::new(Vec::with_capacity(needed + 16));
    let mut block = Zeroizing::new(Vec::new());

    while material.len() < needed {
        let mut hasher = Md5::new();
        hasher.update(&*block);
        hasher.update(password);
        hasher.update(salt);
        let digest = hasher.finalize();
        block.clear();
        block.extend_from_slice(&digest);
        material.extend_from_slice(&block);
    }

    DerivedKey {
        key: Zeroizing::new(material[..key_len].to_vec()),
        iv: Zeroizing::new(material[key_len..needed].to_vec()),
    }
}
