//! Error types for dotenvenc core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps them to exit
//! codes and user-facing messages.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for dotenvenc operations.
pub type Result<T> = std::result::Result<T, DotenvencError>;

/// Core error type for dotenvenc operations.
#[derive(Debug, Error)]
pub enum DotenvencError {
    /// No password from the caller, the environment or the prompt
    #[error("No password provided and none could be resolved from the environment or a prompt")]
    MissingPassword,

    /// Confirmation entry differs from the first entry
    #[error("Password did not match")]
    PasswordMismatch,

    /// Required input file is missing
    #[error("Secrets file \"{}\" not found", path.display())]
    FileNotFound { path: PathBuf },

    /// Decryption yielded no variables
    #[error(
        "Restored no env variables from \"{}\". Either empty input file or wrong password",
        path.display()
    )]
    WrongPasswordOrEmptyFile { path: PathBuf },

    /// Encrypted file is not `hex:hex`
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Random source or cipher construction failure
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}
