//! Default file locations and password lookup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default decrypted secrets file.
pub const DEFAULT_DECRYPTED_FILE: &str = "./.env";

/// Default encrypted secrets file.
pub const DEFAULT_ENCRYPTED_FILE: &str = "./.env.enc";

/// Environment variable consulted for the password.
pub const DEFAULT_PASSWORD_ENV_VAR: &str = "DOTENVENC_PASS";

/// Suffix appended to the encrypted path for the readable companion.
pub const DEFAULT_READABLE_SUFFIX: &str = ".readable";

/// Settings shared by every operation of a [`crate::SecretsFile`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub decrypted_file: PathBuf,
    pub encrypted_file: PathBuf,
    pub password_env_var: String,
    pub readable_suffix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            decrypted_file: PathBuf::from(DEFAULT_DECRYPTED_FILE),
            encrypted_file: PathBuf::from(DEFAULT_ENCRYPTED_FILE),
            password_env_var: DEFAULT_PASSWORD_ENV_VAR.to_string(),
            readable_suffix: DEFAULT_READABLE_SUFFIX.to_string(),
        }
    }
}

impl Settings {
    /// `<encrypted>.readable` next to the given encrypted file.
    pub fn readable_path(&self, encrypted_file: &Path) -> PathBuf {
        let mut name = encrypted_file.as_os_str().to_os_string();
        name.push(&self.readable_suffix);
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.decrypted_file, PathBuf::from("./.env"));
        assert_eq!(settings.encrypted_file, PathBuf::from("./.env.enc"));
        assert_eq!(settings.password_env_var, "DOTENVENC_PASS");
    }

    #[test]
    fn test_readable_path_appends_suffix() {
        let settings = Settings::default();
        assert_eq!(
            settings.readable_path(Path::new("/somewhere/else/.env.enc.custom")),
            PathBuf::from("/somewhere/else/.env.enc.custom.readable")
        );
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"encrypted_file": "secrets.enc"}"#).unwrap();
        assert_eq!(settings.encrypted_file, PathBuf::from("secrets.enc"));
        assert_eq!(settings.decrypted_file, PathBuf::from("./.env"));
        assert_eq!(settings.readable_suffix, ".readable");
    }
}
