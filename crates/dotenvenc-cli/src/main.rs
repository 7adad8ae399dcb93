//! Dotenvenc CLI - encrypt and decrypt .env secrets files
//!
//! This is the command-line interface for dotenvenc. It resolves paths from
//! flags and configuration, wires the terminal prompt and the process
//! environment into the core service, and maps failures to exit codes.

mod cli;
mod config;
mod constants;
mod errors;
mod prompt;

use std::io::{self, IsTerminal};

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dotenvenc_core::{DecryptOptions, EncryptOptions, ProcessEnvironment, SecretsFile, Settings};

use crate::cli::{Cli, Mode};
use crate::config::load_config;
use crate::errors::CliError;
use crate::prompt::TerminalPrompt;

type Secrets = SecretsFile<TerminalPrompt, ProcessEnvironment>;

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "dotenvenc", &mut io::stdout());
        return;
    }

    init_logging(cli.silent);

    if let Err(err) = run(cli) {
        match err.downcast::<CliError>() {
            Ok(cli_err) => cli_err.exit(),
            Err(other) => CliError::Failed(format!("{:#}", other)).exit(),
        }
    }
}

fn init_logging(silent: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(silent)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

/// Log level for our own crates only; dependencies stay at the `error` default.
fn default_directives(silent: bool) -> String {
    let level = if silent { "error" } else { "info" };
    format!("error,dotenvenc={0},dotenvenc_core={0}", level)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(mode) = cli.mode() else {
        return Err(CliError::invalid_input(
            "Missing either -e to encrypt, -d to decrypt or -x to export",
        )
        .into());
    };

    let settings = load_config(cli.config.as_deref())?.into_settings();
    let mut secrets = SecretsFile::new(settings, TerminalPrompt::new(), ProcessEnvironment);

    match mode {
        Mode::Encrypt => encrypt(&secrets, cli),
        Mode::Decrypt => {
            warn_unused_output(&cli);
            let options = decrypt_options(cli, true);
            secrets
                .decrypt(options, &mut io::stdout().lock())
                .map_err(CliError::from)?;
            Ok(())
        }
        Mode::Export => {
            warn_unused_output(&cli);
            let options = decrypt_options(cli, false);
            secrets
                .print_export(options, &mut io::stdout().lock())
                .map_err(CliError::from)?;
            Ok(())
        }
    }
}

fn encrypt(secrets: &Secrets, cli: Cli) -> anyhow::Result<()> {
    let encrypted_file = encrypted_output(secrets.settings(), &cli);
    let options = EncryptOptions {
        password: cli.password,
        decrypted_file: cli.input,
        encrypted_file: Some(encrypted_file.clone()),
        include_readable: cli.readable,
    };
    secrets.encrypt(options).map_err(CliError::from)?;

    info!("Saved encrypted file: {}", encrypted_file.display());
    if cli.readable {
        info!(
            "And additionally saved semi-encrypted file: {}",
            secrets.settings().readable_path(&encrypted_file).display()
        );
    }
    Ok(())
}

fn encrypted_output(settings: &Settings, cli: &Cli) -> std::path::PathBuf {
    cli.output
        .clone()
        .unwrap_or_else(|| settings.encrypted_file.clone())
}

fn decrypt_options(cli: Cli, print: bool) -> DecryptOptions {
    DecryptOptions {
        password: cli.password,
        encrypted_file: cli.input,
        print,
    }
}

fn warn_unused_output(cli: &Cli) {
    if cli.output.is_some() {
        warn!("--output only applies when encrypting; ignoring it");
    }
    if cli.readable {
        warn!("--readable only applies when encrypting; ignoring it");
    }
}
