//! Encrypt, decrypt and export operations over secrets files.
//!
//! Every operation is a single pass: resolve the password, check the input
//! file exists, read, transform, then write or return. Nothing is kept between
//! calls except what decryption merges into the [`Environment`].

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::crypto::{generate_iv, open_doc, seal_doc, KeyDerivation, Password, ZeroPadded};
use crate::env_file::{format_assignment, format_export, parse, EnvMap};
use crate::envelope::Envelope;
use crate::error::{DotenvencError, Result};
use crate::fs::write_atomic;
use crate::readable::write_digests;
use crate::settings::Settings;

/// Source of a password when none was passed and the environment has none.
pub trait PasswordPrompt {
    /// Ask for a password. With `confirm`, ask twice and fail with
    /// `DotenvencError::PasswordMismatch` if the entries differ.
    fn acquire_password(&self, confirm: bool) -> Result<String>;
}

impl<T: PasswordPrompt + ?Sized> PasswordPrompt for &T {
    fn acquire_password(&self, confirm: bool) -> Result<String> {
        (**self).acquire_password(confirm)
    }
}

/// Prompt for non-interactive use; always reports a missing password.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

impl PasswordPrompt for NoPrompt {
    fn acquire_password(&self, _confirm: bool) -> Result<String> {
        Err(DotenvencError::MissingPassword)
    }
}

/// Environment variables: read for the password, written by decryption.
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;
    fn set_var(&mut self, name: &str, value: &str);
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn set_var(&mut self, name: &str, value: &str) {
        if value.contains('\0') {
            warn!(variable = name, "value contains a NUL byte; not exported");
            return;
        }
        std::env::set_var(name, value);
    }
}

/// In-memory environment for tests and embedding.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnvironment {
    vars: HashMap<String, String>,
}

impl MemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

impl Environment for MemoryEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn set_var(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }
}

/// Parameters for [`SecretsFile::encrypt`]. Unset paths fall back to [`Settings`].
#[derive(Clone, Default)]
pub struct EncryptOptions {
    pub password: Option<String>,
    pub decrypted_file: Option<PathBuf>,
    pub encrypted_file: Option<PathBuf>,
    pub include_readable: bool,
}

/// Parameters for [`SecretsFile::decrypt`] and [`SecretsFile::print_export`].
#[derive(Clone, Default)]
pub struct DecryptOptions {
    pub password: Option<String>,
    pub encrypted_file: Option<PathBuf>,
    pub print: bool,
}

/// Encrypted secrets file operations with injected prompt and environment.
pub struct SecretsFile<P, E> {
    settings: Settings,
    prompt: P,
    env: E,
    kdf: Box<dyn KeyDerivation>,
}

impl<P: PasswordPrompt, E: Environment> SecretsFile<P, E> {
    pub fn new(settings: Settings, prompt: P, env: E) -> Self {
        Self {
            settings,
            prompt,
            env,
            kdf: Box::new(ZeroPadded),
        }
    }

    /// Replace the default zero-padding key derivation.
    ///
    /// Files written with one strategy can only be read back with the same one;
    /// the envelope does not record which was used.
    pub fn with_key_derivation(mut self, kdf: impl KeyDerivation + 'static) -> Self {
        self.kdf = Box::new(kdf);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    /// Encrypt the decrypted file byte-for-byte into an envelope on disk.
    ///
    /// Returns the raw ciphertext. With `include_readable`, also writes the
    /// digest companion next to the encrypted file.
    ///
    /// # Errors
    ///
    /// - `MissingPassword` / `PasswordMismatch` before any file is touched
    /// - `FileNotFound` if the decrypted file does not exist
    pub fn encrypt(&self, options: EncryptOptions) -> Result<Vec<u8>> {
        let password = self.resolve_password(options.password, true)?;
        let decrypted_file = options
            .decrypted_file
            .unwrap_or_else(|| self.settings.decrypted_file.clone());
        let encrypted_file = options
            .encrypted_file
            .unwrap_or_else(|| self.settings.encrypted_file.clone());

        if !decrypted_file.exists() {
            return Err(DotenvencError::FileNotFound {
                path: decrypted_file,
            });
        }
        if encrypted_file.exists() {
            warn!(
                path = %encrypted_file.display(),
                "encrypted secrets output file already exists; overwriting"
            );
        }

        let plaintext = Zeroizing::new(fs::read(&decrypted_file)?);
        let key = self.kdf.derive(&password);
        let iv = generate_iv()?;
        let envelope = Envelope::new(iv, seal_doc(&key, &iv, &plaintext)?);
        write_atomic(&encrypted_file, envelope.encode().as_bytes())?;
        info!(
            input = %decrypted_file.display(),
            output = %encrypted_file.display(),
            bytes = plaintext.len(),
            "saved encrypted file"
        );

        if options.include_readable {
            let env = parse(&plaintext);
            write_digests(
                &self.settings.readable_path(&encrypted_file),
                &password,
                &env,
            )?;
        }

        Ok(envelope.ciphertext)
    }

    /// Decrypt the encrypted file, merge every variable into the environment
    /// and return them.
    ///
    /// With `print`, writes one `KEY="VALUE"` line per variable to `out`.
    ///
    /// # Errors
    ///
    /// - `MissingPassword` before any file is touched
    /// - `FileNotFound` if the encrypted file does not exist
    /// - `MalformedEnvelope` if it is not `hex:hex`
    /// - `WrongPasswordOrEmptyFile` if no variable could be parsed
    pub fn decrypt<W: Write>(&mut self, options: DecryptOptions, out: &mut W) -> Result<EnvMap> {
        let env = self.restore(options.password, options.encrypted_file)?;
        if options.print {
            for (key, value) in env.iter() {
                writeln!(out, "{}", format_assignment(key, value))?;
            }
        }
        Ok(env)
    }

    /// Decrypt like [`Self::decrypt`] and write `export KEY="VALUE";` lines to
    /// `out` in file order.
    pub fn print_export<W: Write>(&mut self, options: DecryptOptions, out: &mut W) -> Result<()> {
        let env = self.restore(options.password, options.encrypted_file)?;
        for (key, value) in env.iter() {
            writeln!(out, "{}", format_export(key, value))?;
        }
        Ok(())
    }

    fn restore(
        &mut self,
        password: Option<String>,
        encrypted_file: Option<PathBuf>,
    ) -> Result<EnvMap> {
        let password = self.resolve_password(password, false)?;
        let encrypted_file =
            encrypted_file.unwrap_or_else(|| self.settings.encrypted_file.clone());
        if !encrypted_file.exists() {
            return Err(DotenvencError::FileNotFound {
                path: encrypted_file,
            });
        }

        let envelope = read_envelope(&encrypted_file)?;
        debug!(
            path = %encrypted_file.display(),
            ciphertext_bytes = envelope.ciphertext.len(),
            "decoded envelope"
        );
        let key = self.kdf.derive(&password);
        let plaintext = Zeroizing::new(open_doc(&key, &envelope.iv, &envelope.ciphertext)?);
        let env = parse(&plaintext);
        if env.is_empty() {
            return Err(DotenvencError::WrongPasswordOrEmptyFile {
                path: encrypted_file,
            });
        }

        for (name, value) in env.iter() {
            self.env.set_var(name, value);
        }
        info!(
            path = %encrypted_file.display(),
            variables = env.len(),
            "restored env variables"
        );
        Ok(env)
    }

    /// Explicit argument, then the password environment variable, then the
    /// prompt. Empty strings count as absent.
    fn resolve_password(&self, explicit: Option<String>, confirm: bool) -> Result<Password> {
        if let Some(value) = explicit.filter(|value| !value.is_empty()) {
            return Password::new(value);
        }

        let env_var = &self.settings.password_env_var;
        if let Some(value) = self.env.var(env_var).filter(|value| !value.is_empty()) {
            info!("using password from env variable {}", env_var);
            return Password::new(value);
        }

        info!("no env variable {} found; prompting for password", env_var);
        Password::new(self.prompt.acquire_password(confirm)?)
    }
}

fn read_envelope(path: &Path) -> Result<Envelope> {
    let bytes = fs::read(path)?;
    let text = std::str::from_utf8(&bytes).map_err(|_| {
        DotenvencError::MalformedEnvelope(format!("{} is not a text file", path.display()))
    })?;
    Envelope::decode(text)
}
