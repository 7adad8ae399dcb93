use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use dotenvenc_core::VERSION;

/// Dotenvenc - encrypt a .env secrets file so it can be committed, decrypt it at run time
#[derive(Parser)]
#[command(name = "dotenvenc")]
#[command(author, version = VERSION, long_about = None)]
pub struct Cli {
    /// Encrypt the decrypted env file and write the encrypted file
    #[arg(short, long, group = "mode")]
    pub encrypt: bool,

    /// Decrypt the encrypted env file and print its variables
    #[arg(short, long, group = "mode")]
    pub decrypt: bool,

    /// Decrypt and print `export KEY="VALUE";` statements for a shell
    #[arg(short = 'x', long, group = "mode")]
    pub export: bool,

    /// Input file: the decrypted file when encrypting, the encrypted file otherwise
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file when encrypting
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also write a readable companion of keyed value digests
    #[arg(short, long)]
    pub readable: bool,

    /// Only log errors
    #[arg(short, long)]
    pub silent: bool,

    /// Password (ends up in shell history; prefer the env variable or the prompt)
    #[arg(short, long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
    Export,
}

impl Cli {
    pub fn mode(&self) -> Option<Mode> {
        if self.encrypt {
            Some(Mode::Encrypt)
        } else if self.decrypt {
            Some(Mode::Decrypt)
        } else if self.export {
            Some(Mode::Export)
        } else {
            None
        }
    }
}
