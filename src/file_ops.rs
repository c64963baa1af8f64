//! File encryption/decryption operations
//!
//! This module provides file-level wrappers around [`crate::message`]:
//! read text, encrypt or decrypt it, and write the result with owner-only
//! permissions.

use crate::algorithm::Algorithm;
use crate::error::{ErrorCategory, ErrorKind, Result, SealnoteError};
use crate::message;
use crate::passphrase::PassphraseReader;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Encrypt a text file with a password
///
/// Reads the message from `input_path`, encrypts it using a password from
/// `passphrase_reader`, and writes the armored ciphertext to `output_path`.
///
/// The output file is created with mode 0o600 (read/write for owner only) on Unix systems.
pub fn encrypt_file(
    input_path: &Path,
    output_path: &Path,
    algorithm: Algorithm,
    passphrase_reader: &mut dyn PassphraseReader,
) -> Result<()> {
    let plaintext = read_text_file(input_path)?;
    let password = passphrase_reader.read_password()?;
    let ciphertext = message::encrypt_message(&plaintext, &password, algorithm)?;
    write_file_secure(output_path, ciphertext.as_bytes())
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;

    Ok(())
}

/// Decrypt a file holding an armored ciphertext
///
/// Reads the ciphertext from `input_path`, decrypts it using a password from
/// `passphrase_reader`, and writes the message to `output_path`.
///
/// The output file is created with mode 0o600 (read/write for owner only) on Unix systems.
pub fn decrypt_file(
    input_path: &Path,
    output_path: &Path,
    algorithm: Algorithm,
    passphrase_reader: &mut dyn PassphraseReader,
) -> Result<()> {
    let ciphertext = read_text_file(input_path)?;
    let password = passphrase_reader.read_password()?;
    let plaintext = message::decrypt_message(&ciphertext, &password, algorithm)?;
    write_file_secure(output_path, plaintext.as_bytes())
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;
    Ok(())
}

/// Read a file that must hold UTF-8 text
pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| read_error(path, e))?;
    String::from_utf8(bytes).map_err(|e| {
        SealnoteError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::Io,
            format!("{} is not valid UTF-8", path.display()),
            e,
        )
    })
}

/// Atomically write `contents` to `path` with owner-only permissions
///
/// The data goes to a temporary file next to `path`, is fsynced, and is
/// then renamed over `path`, so either the old file or the complete new
/// file exists, never a partial one.
pub fn write_file_secure(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        SealnoteError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::Io,
            format!("failed to create tempfile in {}", dir.display()),
            e,
        )
    })?;

    temp_file.write_all(contents).map_err(|e| {
        SealnoteError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            "failed to write to tempfile",
            e,
        )
    })?;
    // Flush and fsync() such that the rename later, if it succeeds, will
    // always point to a valid file.
    temp_file.flush().map_err(|e| {
        SealnoteError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            "failed to flush tempfile",
            e,
        )
    })?;
    temp_file.as_file().sync_all().map_err(|e| {
        SealnoteError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            "failed to sync file prior to rename",
            e,
        )
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| {
                SealnoteError::with_kind_and_source(
                    ErrorCategory::Internal,
                    ErrorKind::Io,
                    "failed to set tempfile permissions",
                    e,
                )
            })?;
    }

    temp_file.persist(path).map_err(|e| {
        SealnoteError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            format!("failed to rename to target file {}", path.display()),
            e,
        )
    })?;
    Ok(())
}

fn read_error(path: &Path, err: io::Error) -> SealnoteError {
    let category = if err.kind() == io::ErrorKind::NotFound {
        ErrorCategory::User
    } else {
        ErrorCategory::Internal
    };
    SealnoteError::with_kind_and_source(
        category,
        ErrorKind::Io,
        format!("failed to read from {}", path.display()),
        err,
    )
}
