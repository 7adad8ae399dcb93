//! AES-256-CTR stream encryption.
//!
//! CTR mode turns AES into a keystream XORed over the data: the ciphertext is
//! exactly as long as the plaintext and decryption with a wrong key silently
//! produces garbage instead of failing.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;

use super::key::DerivedKey;
use crate::error::{DotenvencError, Result};

/// IV length in bytes (one AES block).
pub const IV_LENGTH: usize = 16;

/// Full 128-bit big-endian counter, matching OpenSSL's `aes-256-ctr`.
type Aes256Ctr = Ctr128BE<Aes256>;

/// Generate a fresh random IV from the OS random source.
pub fn generate_iv() -> Result<[u8; IV_LENGTH]> {
    let mut iv = [0u8; IV_LENGTH];
    getrandom::getrandom(&mut iv)
        .map_err(|e| DotenvencError::Crypto(format!("Failed to generate IV: {}", e)))?;
    Ok(iv)
}

/// Encrypt `plaintext` under `key` and `iv`.
///
/// Deterministic for a given (key, iv, plaintext). Never reuse an IV with the
/// same key for different plaintexts.
pub fn seal_doc(key: &DerivedKey, iv: &[u8; IV_LENGTH], plaintext: &[u8]) -> Result<Vec<u8>> {
    apply(key, iv, plaintext)
}

/// Decrypt `ciphertext` under `key` and `iv`.
pub fn open_doc(key: &DerivedKey, iv: &[u8; IV_LENGTH], ciphertext: &[u8]) -> Result<Vec<u8>> {
    apply(key, iv, ciphertext)
}

fn apply(key: &DerivedKey, iv: &[u8; IV_LENGTH], input: &[u8]) -> Result<Vec<u8>> {
    let mut cipher = Aes256Ctr::new_from_slices(key.as_bytes(), iv)
        .map_err(|e| DotenvencError::Crypto(format!("Failed to create cipher: {}", e)))?;
    let mut buffer = input.to_vec();
    cipher.apply_keystream(&mut buffer);
    Ok(buffer)
}
