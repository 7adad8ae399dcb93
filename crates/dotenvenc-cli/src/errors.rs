//! CLI error types for structured error handling.
//!
//! Core errors are classified here into exit codes so every failure path in
//! `main` ends the same way: `Error: <message>` on stderr and a mapped code.

use std::fmt;

use dotenvenc_core::DotenvencError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Secrets file or explicitly named config file is missing
    NotFound(String),

    /// Wrong password or confirmation mismatch
    AuthFailed(String),

    /// Invalid user input
    InvalidInput(String),

    /// Anything else
    Failed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound(message)
            | CliError::AuthFailed(message)
            | CliError::InvalidInput(message)
            | CliError::Failed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl From<DotenvencError> for CliError {
    fn from(err: DotenvencError) -> Self {
        let message = err.to_string();
        match err {
            DotenvencError::FileNotFound { .. } => CliError::NotFound(message),
            DotenvencError::MissingPassword | DotenvencError::MalformedEnvelope(_) => {
                CliError::InvalidInput(message)
            }
            DotenvencError::PasswordMismatch | DotenvencError::WrongPasswordOrEmptyFile { .. } => {
                CliError::AuthFailed(message)
            }
            _ => CliError::Failed(message),
        }
    }
}

impl CliError {
    /// Create a NotFound error.
    pub fn not_found(message: impl Into<String>) -> Self {
        CliError::NotFound(message.into())
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound(_) => exit_codes::NOT_FOUND,
            CliError::AuthFailed(_) => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Failed(_) => exit_codes::FAILURE,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}
