//! Terminal password prompt.

use std::io;

use dialoguer::console::Term;
use dialoguer::Password;
use dotenvenc_core::{DotenvencError, PasswordPrompt};

/// Reads the password from the terminal without echo.
#[derive(Debug, Clone)]
pub struct TerminalPrompt {
    term: Term,
}

impl TerminalPrompt {
    /// Prompt on stderr, where dialoguer draws by default.
    pub fn new() -> Self {
        Self::with_term(Term::stderr())
    }

    pub fn with_term(term: Term) -> Self {
        Self { term }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordPrompt for TerminalPrompt {
    fn acquire_password(&self, confirm: bool) -> dotenvenc_core::Result<String> {
        if !self.term.is_term() {
            return Err(DotenvencError::MissingPassword);
        }

        let password = self.read_password("Type password")?;
        if confirm && self.read_password("Confirm password")? != password {
            return Err(DotenvencError::PasswordMismatch);
        }
        Ok(password)
    }
}

impl TerminalPrompt {
    fn read_password(&self, prompt: &str) -> dotenvenc_core::Result<String> {
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact_on(&self.term)
            .map_err(|e| io::Error::other(format!("Failed to read password: {}", e)).into())
    }
}
