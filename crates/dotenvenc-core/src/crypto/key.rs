//! Passwords and key derivation.
//!
//! The default derivation copies the password bytes into a 32-byte buffer,
//! zero-padding short passwords and truncating long ones. It is not a KDF; it
//! is kept because every existing encrypted file was produced with it.
//! [`KeyDerivation`] lets a caller plug in something stronger for new files.

use secrecy::{ExposeSecret, SecretString};
use zeroize::ZeroizeOnDrop;

use crate::error::{DotenvencError, Result};

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// A non-empty password held in memory for the duration of one operation.
pub struct Password {
    secret: SecretString,
}

impl Password {
    /// Wrap a password, rejecting the empty string.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DotenvencError::MissingPassword);
        }
        Ok(Self {
            secret: SecretString::from(value),
        })
    }

    /// Raw password bytes.
    ///
    /// Avoid storing or logging this value.
    pub fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// A cipher key derived from a password.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Create a new DerivedKey from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Strategy turning a password into a cipher key.
pub trait KeyDerivation: Send + Sync {
    fn derive(&self, password: &Password) -> DerivedKey;
}

/// Zero-pad or truncate the password to [`KEY_LENGTH`] bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroPadded;

impl KeyDerivation for ZeroPadded {
    fn derive(&self, password: &Password) -> DerivedKey {
        derive_key(password.as_bytes())
    }
}

/// Derive a key by right-padding `password` with zero bytes, or truncating it,
/// to exactly [`KEY_LENGTH`] bytes.
///
/// # Examples
///
/// ```
/// use dotenvenc_core::crypto::derive_key;
///
/// let key = derive_key(b"secret");
/// assert_eq!(&key.as_bytes()[..6], b"secret");
/// assert!(key.as_bytes()[6..].iter().all(|b| *b == 0));
/// ```
pub fn derive_key(password: &[u8]) -> DerivedKey {
    let mut key = [0u8; KEY_LENGTH];
    let len = password.len().min(KEY_LENGTH);
    key[..len].copy_from_slice(&password[..len]);
    DerivedKey::from_bytes(key)
}
