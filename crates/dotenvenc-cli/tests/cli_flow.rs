use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::{tempdir, TempDir};

const PASSWORD: &str = "superDuperPassword";

const SAMPLE: &str = "\
ALPHA=bar
BETA=\"foo bar\"
GAMMA=\"multi\\nline\"
DELTA='With \"double quotes\" inside'
";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_dotenvenc"))
}

/// A working directory holding `.env`, with its own empty config home.
fn project() -> TempDir {
    let dir = tempdir().expect("tempdir");
    std::fs::write(dir.path().join(".env"), SAMPLE).expect("write .env");
    std::fs::create_dir_all(dir.path().join("xdg")).expect("create config home");
    dir
}

fn command(dir: &Path) -> Command {
    let mut cmd = Command::new(bin());
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("DOTENVENC_PASS", PASSWORD)
        .env_remove("DOTENVENC_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn run(dir: &Path, args: &[&str]) -> Output {
    command(dir).args(args).output().expect("run dotenvenc")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed: stdout={}, stderr={}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_cli_encrypt_then_decrypt() {
    let dir = project();

    let encrypt = run(dir.path(), &["-e"]);
    assert_success(&encrypt);
    assert!(stderr(&encrypt).contains("Saved encrypted file: ./.env.enc"));
    assert!(stderr(&encrypt).contains("using password from env variable DOTENVENC_PASS"));

    let envelope = std::fs::read_to_string(dir.path().join(".env.enc")).expect("read envelope");
    assert!(envelope.contains(':'));
    assert!(!envelope.contains("ALPHA"));

    let decrypt = run(dir.path(), &["-d"]);
    assert_success(&decrypt);
    assert_eq!(
        stdout(&decrypt),
        "ALPHA=\"bar\"\nBETA=\"foo bar\"\nGAMMA=\"multi\nline\"\nDELTA=\"With \\\"double quotes\\\" inside\"\n"
    );
}

#[test]
fn test_cli_custom_paths() {
    let dir = project();
    std::fs::rename(dir.path().join(".env"), dir.path().join("plain.env")).expect("rename");

    let encrypt = run(
        dir.path(),
        &["--encrypt", "-i", "plain.env", "-o", "secrets.enc"],
    );
    assert_success(&encrypt);
    assert!(dir.path().join("secrets.enc").exists());
    assert!(!dir.path().join(".env.enc").exists());

    let decrypt = run(dir.path(), &["--decrypt", "--input", "secrets.enc"]);
    assert_success(&decrypt);
    assert!(stdout(&decrypt).starts_with("ALPHA=\"bar\"\n"));
}

#[test]
fn test_cli_export() {
    let dir = project();
    std::fs::write(
        dir.path().join(".env"),
        "ALPHA=bar\nDELTA=\"With \\\"double quotes\\\" inside\"\n",
    )
    .expect("write .env");
    assert_success(&run(dir.path(), &["-e"]));

    let export = run(dir.path(), &["-x"]);
    assert_success(&export);
    assert_eq!(
        stdout(&export),
        "export ALPHA=\"bar\";\nexport DELTA=\"With \\\"double quotes\\\" inside\";\n"
    );
}

#[test]
fn test_cli_missing_input_file() {
    let dir = project();

    let encrypt = run(dir.path(), &["-e", "-i", "missing.env"]);
    assert_eq!(encrypt.status.code(), Some(3));
    assert!(stderr(&encrypt).contains("Error: Secrets file \"missing.env\" not found"));
    assert!(!dir.path().join(".env.enc").exists());

    let decrypt = run(dir.path(), &["-d"]);
    assert_eq!(decrypt.status.code(), Some(3));
    assert!(stderr(&decrypt).contains(".env.enc"));
}

#[test]
fn test_cli_wrong_password() {
    let dir = project();
    assert_success(&run(dir.path(), &["-e"]));

    let decrypt = command(dir.path())
        .env("DOTENVENC_PASS", "notTheRightPassword")
        .arg("-d")
        .output()
        .expect("run dotenvenc");
    assert_eq!(decrypt.status.code(), Some(5));
    assert!(stderr(&decrypt).contains("Either empty input file or wrong password"));
    assert!(stdout(&decrypt).is_empty());
}

#[test]
fn test_cli_explicit_password_beats_env_var() {
    let dir = project();
    assert_success(&run(dir.path(), &["-e", "-p", "fromTheFlag"]));

    let with_env = run(dir.path(), &["-d"]);
    assert_eq!(with_env.status.code(), Some(5));

    let with_flag = run(dir.path(), &["-d", "--password", "fromTheFlag"]);
    assert_success(&with_flag);
}

#[test]
fn test_cli_no_password_without_tty() {
    let dir = project();

    let encrypt = command(dir.path())
        .env_remove("DOTENVENC_PASS")
        .arg("-e")
        .output()
        .expect("run dotenvenc");
    assert_eq!(encrypt.status.code(), Some(4));
    assert!(stderr(&encrypt).contains("No password provided"));
    assert!(!dir.path().join(".env.enc").exists());
}

#[test]
fn test_cli_readable_companion() {
    let dir = project();

    let encrypt = run(dir.path(), &["-e", "-r"]);
    assert_success(&encrypt);
    assert!(stderr(&encrypt)
        .contains("And additionally saved semi-encrypted file: ./.env.enc.readable"));

    let readable =
        std::fs::read_to_string(dir.path().join(".env.enc.readable")).expect("read readable");
    assert!(readable.contains("\"ALPHA\""));
    assert!(!readable.contains("foo bar"));
}

#[test]
fn test_cli_silent_suppresses_notices() {
    let dir = project();
    std::fs::write(dir.path().join(".env.enc"), "stale").expect("write stale");

    let encrypt = run(dir.path(), &["-e", "-s"]);
    assert_success(&encrypt);
    assert!(stderr(&encrypt).is_empty(), "stderr={}", stderr(&encrypt));

    let decrypt = run(dir.path(), &["-d", "--silent"]);
    assert_success(&decrypt);
    assert!(stderr(&decrypt).is_empty());
    assert!(stdout(&decrypt).contains("ALPHA=\"bar\""));
}

#[test]
fn test_cli_overwrite_warns() {
    let dir = project();
    std::fs::write(dir.path().join(".env.enc"), "stale").expect("write stale");

    let encrypt = run(dir.path(), &["-e"]);
    assert_success(&encrypt);
    assert!(stderr(&encrypt).contains("already exists; overwriting"));
}

#[test]
fn test_cli_missing_mode() {
    let dir = project();

    let output = run(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("Missing either -e to encrypt, -d to decrypt or -x to export"));
}

#[test]
fn test_cli_conflicting_modes() {
    let dir = project();

    let output = run(dir.path(), &["-e", "-d"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_malformed_envelope() {
    let dir = project();
    std::fs::write(dir.path().join(".env.enc"), "not an envelope").expect("write");

    let output = run(dir.path(), &["-d"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("Malformed envelope"));
}

#[test]
fn test_cli_config_file_paths() {
    let dir = project();
    let config_dir = dir.path().join("xdg").join("dotenvenc");
    std::fs::create_dir_all(&config_dir).expect("create config dir");
    std::fs::write(
        config_dir.join("config.toml"),
        "[files]\nencrypted = \"configured.enc\"\n\n[password]\nenv_var = \"APP_PASS\"\n",
    )
    .expect("write config");

    let encrypt = command(dir.path())
        .env_remove("DOTENVENC_PASS")
        .env("APP_PASS", PASSWORD)
        .arg("-e")
        .output()
        .expect("run dotenvenc");
    assert_success(&encrypt);
    assert!(dir.path().join("configured.enc").exists());
    assert!(!dir.path().join(".env.enc").exists());

    // A flag still wins over the configured path
    let flagged = command(dir.path())
        .env("APP_PASS", PASSWORD)
        .args(["-e", "-o", "flagged.enc"])
        .output()
        .expect("run dotenvenc");
    assert_success(&flagged);
    assert!(dir.path().join("flagged.enc").exists());
}

#[test]
fn test_cli_explicit_config_missing() {
    let dir = project();

    let output = run(dir.path(), &["-e", "--config", "nope.toml"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Config file \"nope.toml\" not found"));
}

#[test]
fn test_cli_completions() {
    let dir = project();

    let output = run(dir.path(), &["--completions", "bash"]);
    assert_success(&output);
    assert!(stdout(&output).contains("dotenvenc"));
}
