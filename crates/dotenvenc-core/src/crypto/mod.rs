//! Cryptographic operations for dotenvenc.
//!
//! - **key**: password handling and password-to-key derivation
//! - **cipher**: AES-256 in CTR mode over the raw file bytes
//! - **digest**: HMAC-SHA-256 digests for the readable companion file
//!
//! ## Security Model
//!
//! The envelope format has no salt, no KDF work factor and no authentication
//! tag. Existing `.env.enc` files depend on that, so the scheme is kept as-is:
//! - Key is the password zero-padded or truncated to 32 bytes
//! - A fresh random 16-byte IV per encryption
//! - A wrong password is only detected because the garbage it decrypts to
//!   parses to zero variables
//!
//! We do NOT defend against:
//! - Offline brute-force of weak passwords
//! - Tampering with the encrypted file

pub mod cipher;
pub mod digest;
pub mod key;

pub use cipher::{generate_iv, open_doc, seal_doc, IV_LENGTH};
pub use digest::readable_digest;
pub use key::{derive_key, DerivedKey, KeyDerivation, Password, ZeroPadded, KEY_LENGTH};
