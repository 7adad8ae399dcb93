//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and by clap for usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure (I/O, random source).
    pub const FAILURE: i32 = 1;

    /// Resource not found (secrets file, config file).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input: missing mode, missing password, malformed envelope.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong password, confirmation mismatch).
    pub const AUTH_FAILED: i32 = 5;
}

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "DOTENVENC_CONFIG";
