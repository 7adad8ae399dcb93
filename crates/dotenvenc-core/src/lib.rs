//! # Dotenvenc Core
//!
//! Core library for dotenvenc - encrypt a `.env` secrets file with a password so
//! it can be committed, then decrypt it back into the environment at run time.
//!
//! This crate provides the encryption engine, the on-disk envelope format and the
//! env-file parser, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation, AES-256-CTR cipher, readable digests
//! - **envelope**: `hex(iv):hex(ciphertext)` text format
//! - **env_file**: `KEY=VALUE` parser and output formatting
//! - **readable**: companion file of per-value digests
//! - **service**: `SecretsFile`, the encrypt / decrypt / export operations
//! - **settings**: default paths and the password environment variable

pub mod crypto;
pub mod env_file;
pub mod envelope;
pub mod error;
pub mod fs;
pub mod readable;
pub mod service;
pub mod settings;

pub use env_file::{parse, EnvMap};
pub use envelope::Envelope;
pub use error::{DotenvencError, Result};
pub use service::{
    DecryptOptions, EncryptOptions, Environment, MemoryEnvironment, NoPrompt, PasswordPrompt,
    ProcessEnvironment, SecretsFile,
};
pub use settings::Settings;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
