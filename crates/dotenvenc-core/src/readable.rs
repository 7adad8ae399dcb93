//! Readable companion file.
//!
//! Maps every variable name to an HMAC of its value so two versions of an
//! encrypted file can be diffed without decrypting them. Never read back.

use std::path::Path;

use tracing::info;

use crate::crypto::{readable_digest, Password};
use crate::env_file::EnvMap;
use crate::error::Result;
use crate::fs::write_atomic;

/// Replace every value of `env` with its keyed digest.
pub fn digest_map(password: &Password, env: &EnvMap) -> Result<EnvMap> {
    env.iter()
        .map(|(key, value)| readable_digest(password, value).map(|digest| (key, digest)))
        .collect()
}

/// Write the digest map of `env` to `path` as indented JSON.
pub fn write_digests(path: &Path, password: &Password, env: &EnvMap) -> Result<()> {
    let digests = digest_map(password, env)?;
    let mut contents = serde_json::to_string_pretty(&digests)?;
    contents.push('\n');
    write_atomic(path, contents.as_bytes())?;
    info!(path = %path.display(), variables = digests.len(), "wrote readable digests");
    Ok(())
}
