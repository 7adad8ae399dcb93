use std::path::{Path, PathBuf};

use serde::Deserialize;

use dotenvenc_core::Settings;

use crate::constants::CONFIG_ENV_VAR;
use crate::errors::CliError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DotenvencConfig {
    pub files: FilesSection,
    pub password: PasswordSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FilesSection {
    pub decrypted: Option<PathBuf>,
    pub encrypted: Option<PathBuf>,
    pub readable_suffix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PasswordSection {
    pub env_var: Option<String>,
}

impl DotenvencConfig {
    /// Overlay the configured values on the built-in defaults.
    pub fn into_settings(self) -> Settings {
        let mut settings = Settings::default();
        if let Some(path) = self.files.decrypted {
            settings.decrypted_file = path;
        }
        if let Some(path) = self.files.encrypted {
            settings.encrypted_file = path;
        }
        if let Some(suffix) = self.files.readable_suffix {
            settings.readable_suffix = suffix;
        }
        if let Some(name) = self.password.env_var.filter(|name| !name.trim().is_empty()) {
            settings.password_env_var = name;
        }
        settings
    }
}

/// Load the configuration named by `--config`, then `DOTENVENC_CONFIG`, then
/// the default location. Only an explicitly named file has to exist.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<DotenvencConfig> {
    let named = explicit.map(Path::to_path_buf).or_else(|| {
        std::env::var(CONFIG_ENV_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
    });

    if let Some(path) = named {
        if !path.exists() {
            return Err(CliError::not_found(format!(
                "Config file \"{}\" not found",
                path.display()
            ))
            .into());
        }
        return read_config(&path);
    }

    match default_config_path() {
        Ok(path) if path.exists() => read_config(&path),
        _ => Ok(DotenvencConfig::default()),
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<DotenvencConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("dotenvenc"));
        }
    }
    Ok(home_dir()?.join(".config").join("dotenvenc"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
