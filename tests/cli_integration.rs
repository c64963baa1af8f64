//! CLI integration tests
//!
//! Tests the command-line interface end-to-end.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const LONG_MESSAGE: &str =
    "Meet me at the usual place at noon; bring the documents and do not be late.";

/// A sandbox with its own config file, so the user's config never leaks in.
struct Sandbox {
    dir: TempDir,
    config: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        Self::with_config("")
    }

    fn with_config(contents: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.toml");
        fs::write(&config, contents).unwrap();
        Self { dir, config }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Run sealnote with the password fed on stdin
    fn run(&self, args: &[&str], password: &str) -> Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_sealnote"))
            .arg("--passphrase-stdin")
            .args(args)
            .env("SEALNOTE_CONFIG", &self.config)
            .env_remove("SEALNOTE_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();

        {
            let stdin = child.stdin.as_mut().expect("failed to open stdin");
            // The command may exit before reading stdin if it hits an error
            let _ = stdin.write_all(password.as_bytes());
        }

        child.wait_with_output().unwrap()
    }
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_success(output: &Output, what: &str) {
    assert!(output.status.success(), "{} failed: {}", what, stderr_of(output));
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_encrypt_decrypt_file_roundtrip() {
    let sandbox = Sandbox::new();
    let plain = sandbox.path("note.txt");
    let sealed = sandbox.path("note.txt.sealed");
    let opened = sandbox.path("note-opened.txt");
    fs::write(&plain, "Hello, 世界! 🔐\nsecond line\n").unwrap();

    for algorithm in ["AES-256", "ChaCha20", "TripleDES"] {
        let result = sandbox.run(
            &[
                "encrypt",
                "-a",
                algorithm,
                "-i",
                path_str(&plain),
                "-o",
                path_str(&sealed),
            ],
            "correct-horse-42",
        );
        assert_success(&result, "encrypt");
        assert!(fs::read_to_string(&sealed).unwrap().starts_with("U2FsdGVkX1"));

        let result = sandbox.run(
            &[
                "decrypt",
                "-a",
                algorithm,
                "-i",
                path_str(&sealed),
                "-o",
                path_str(&opened),
            ],
            "correct-horse-42",
        );
        assert_success(&result, "decrypt");
        assert_eq!(
            fs::read_to_string(&opened).unwrap(),
            fs::read_to_string(&plain).unwrap()
        );
    }
}

#[test]
fn test_inline_message_roundtrip() {
    let sandbox = Sandbox::new();

    let result = sandbox.run(&["encrypt", "-m", LONG_MESSAGE, "-a", "chacha20"], "s3cret-key");
    assert_success(&result, "encrypt");
    let ciphertext = stdout_of(&result);
    assert!(ciphertext.ends_with('\n'));
    let ciphertext = ciphertext.trim();
    assert!(ciphertext.starts_with("U2FsdGVkX1"));

    let result = sandbox.run(&["decrypt", "-c", ciphertext, "-a", "ChaCha20"], "s3cret-key");
    assert_success(&result, "decrypt");
    assert_eq!(stdout_of(&result), format!("{}\n", LONG_MESSAGE));
}

#[test]
fn test_decrypt_known_ciphertext() {
    let sandbox = Sandbox::new();
    let result = sandbox.run(
        &["decrypt", "-c", "U2FsdGVkX19CQkJCQkJCQkS2ZGafdmgqV6Mg7og76b0="],
        "test",
    );
    assert_success(&result, "decrypt");
    assert_eq!(stdout_of(&result), "test payload\n");
}

#[test]
fn test_decrypt_wrong_password() {
    let sandbox = Sandbox::new();
    let result = sandbox.run(&["encrypt", "-m", LONG_MESSAGE], "correct-horse-42");
    assert_success(&result, "encrypt");
    let ciphertext = stdout_of(&result);

    let result = sandbox.run(&["decrypt", "-c", ciphertext.trim()], "wrong-password");
    assert!(!result.status.success());
    assert!(
        stderr_of(&result).contains("Decryption failed"),
        "unexpected stderr: {}",
        stderr_of(&result)
    );
    assert!(result.stdout.is_empty());
}

#[test]
fn test_decrypt_malformed_ciphertext() {
    let sandbox = Sandbox::new();
    let result = sandbox.run(&["decrypt", "-c", "not base64 at all!"], "abcd");
    assert!(!result.status.success());
    assert!(stderr_of(&result).contains("Malformed ciphertext"));
}

#[test]
fn test_encrypt_weak_key_rejected() {
    let sandbox = Sandbox::new();
    let output = sandbox.path("out.sealed");
    let result = sandbox.run(&["encrypt", "-m", "hello", "-o", path_str(&output)], "abc");
    assert!(!result.status.success());
    assert!(stderr_of(&result).contains("Weak Key"));
    assert!(!output.exists());
}

#[test]
fn test_encrypt_empty_password_rejected() {
    let sandbox = Sandbox::new();
    let result = sandbox.run(&["encrypt", "-m", "hello"], "");
    assert!(!result.status.success());
    assert!(stderr_of(&result).contains("Security Error"));
}

#[test]
fn test_encrypt_blank_message_rejected() {
    let sandbox = Sandbox::new();
    let result = sandbox.run(&["encrypt", "-m", "   "], "abcd");
    assert!(!result.status.success());
    assert!(stderr_of(&result).contains("Input Error"));
}

#[test]
fn test_config_default_algorithm() {
    let sandbox = Sandbox::with_config("[defaults]\nalgorithm = \"TripleDES\"\n");

    let result = sandbox.run(&["encrypt", "-m", LONG_MESSAGE], "fox-and-dog");
    assert_success(&result, "encrypt");
    let ciphertext = stdout_of(&result);

    // The config default applies on the way back too.
    let result = sandbox.run(&["decrypt", "-c", ciphertext.trim()], "fox-and-dog");
    assert_success(&result, "decrypt");
    assert_eq!(stdout_of(&result), format!("{}\n", LONG_MESSAGE));

    // An explicit algorithm overrides it.
    let result = sandbox.run(
        &["decrypt", "-a", "TripleDES", "-c", ciphertext.trim()],
        "fox-and-dog",
    );
    assert_success(&result, "decrypt");
}

#[test]
fn test_invalid_config_rejected() {
    let sandbox = Sandbox::with_config("[defaults]\nalgorithm = \"Blowfish\"\n");
    let result = sandbox.run(&["strength"], "abcd");
    assert!(!result.status.success());
    assert!(stderr_of(&result).contains("config"));
}

#[test]
fn test_unknown_algorithm_flag_rejected() {
    let sandbox = Sandbox::new();
    let result = sandbox.run(&["encrypt", "-a", "Blowfish", "-m", "hello"], "abcd");
    assert!(!result.status.success());
}

#[test]
fn test_keygen_length() {
    let sandbox = Sandbox::new();

    let result = sandbox.run(&["keygen"], "");
    assert_success(&result, "keygen");
    assert_eq!(stdout_of(&result).trim_end().chars().count(), 32);

    let result = sandbox.run(&["keygen", "-l", "12"], "");
    assert_success(&result, "keygen");
    let key = stdout_of(&result);
    let key = key.trim_end();
    assert_eq!(key.chars().count(), 12);
    assert!(stderr_of(&result).contains("Strength"));
}

#[test]
fn test_keygen_length_from_config() {
    let sandbox = Sandbox::with_config("[defaults]\nkey_length = 20\n");
    let result = sandbox.run(&["keygen"], "");
    assert_success(&result, "keygen");
    assert_eq!(stdout_of(&result).trim_end().chars().count(), 20);
}

#[test]
fn test_strength() {
    let sandbox = Sandbox::new();

    let result = sandbox.run(&["strength"], "Abcdefghijk1!");
    assert_success(&result, "strength");
    assert_eq!(stdout_of(&result), "100 Strong\n");

    let result = sandbox.run(&["strength"], "");
    assert_success(&result, "strength");
    assert_eq!(stdout_of(&result), "0 None\n");
}

#[test]
fn test_encrypt_nonexistent_input() {
    let sandbox = Sandbox::new();
    let result = sandbox.run(
        &["encrypt", "-i", path_str(&sandbox.path("absent.txt"))],
        "abcd",
    );
    assert!(!result.status.success());
    assert!(stderr_of(&result).contains("failed to read from"));
}

#[test]
fn test_encrypt_requires_source() {
    let sandbox = Sandbox::new();
    let result = sandbox.run(&["encrypt"], "abcd");
    assert!(!result.status.success());
}

#[test]
#[cfg(unix)]
fn test_output_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let sandbox = Sandbox::new();
    let output = sandbox.path("out.sealed");
    let result = sandbox.run(&["encrypt", "-m", "hello", "-o", path_str(&output)], "abcd");
    assert_success(&result, "encrypt");

    let mode = fs::metadata(&output).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
