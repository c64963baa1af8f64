use std::error::Error as StdError;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCategory {
    /// Any failure that cannot be confidently attributed to any other error
    /// category in this enum.
    ///
    /// In particular this means that use of Internal is never a guarantee
    /// the error is not, for example due to a user error - merely that it
    /// cannot be confidently determined by the code.
    Internal,

    /// The user provided invalid input or performed an action that is
    /// unsupported or impossible to complete.
    User,
}

/// Fine-grained condition flags for consumers that want to branch on error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The message to encrypt is empty or only whitespace.
    EmptyMessage,
    /// No password was supplied.
    MissingKey,
    /// The password is shorter than the minimum accepted length.
    WeakKey,
    /// The ciphertext to decrypt is empty or only whitespace.
    MissingInput,
    /// The ciphertext contains characters outside `[A-Za-z0-9+/=]`.
    MalformedCiphertext,
    /// The primitive failed or produced no output while encrypting.
    EncodingFailed,
    /// Wrong password, wrong algorithm, or corrupted ciphertext. These are
    /// deliberately not told apart.
    DecryptionFailed,
    /// An algorithm tag did not name any supported algorithm.
    UnknownAlgorithm,
    /// Passphrase could not be obtained from the configured reader.
    PassphraseUnavailable,
    /// The configuration file is unreadable or holds invalid values.
    InvalidConfig,
    /// Unexpected state reached within sealnote logic.
    InternalInvariant,
    /// Interaction with the filesystem, stdin/stdout, or other I/O failed.
    Io,
}

#[derive(Debug, Error)]
#[error("{msg}")]
pub struct SealnoteError {
    /// Broad error category, always provided.
    pub category: ErrorCategory,
    /// Optional specific condition tag for consumers that need to
    /// branch their behavior. Any code consuming errors MUST handle
    /// the absence of a defined kind.
    pub kind: Option<ErrorKind>,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    msg: String,
}

impl SealnoteError {
    /// Creates a new error with a required category and display message.
    pub fn new(category: ErrorCategory, msg: impl Into<String>) -> Self {
        Self {
            category,
            kind: None,
            source: None,
            msg: msg.into(),
        }
    }

    /// Creates a new error that also tags the failure with a kind.
    pub fn with_kind(category: ErrorCategory, kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            category,
            kind: Some(kind),
            source: None,
            msg: msg.into(),
        }
    }

    /// Creates a new error that retains the originating source error.
    pub fn with_source(
        category: ErrorCategory,
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            category,
            kind: None,
            source: Some(Box::new(source)),
            msg: msg.into(),
        }
    }

    /// Creates a new error that carries both a kind tag and the originating source error.
    pub fn with_kind_and_source(
        category: ErrorCategory,
        kind: ErrorKind,
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            category,
            kind: Some(kind),
            source: Some(Box::new(source)),
            msg: msg.into(),
        }
    }

    /// The user-facing message carried by the error.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the preserved source error if present.
    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// True if the error is tagged with `kind`.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == Some(kind)
    }

    /// Wraps the current error with a higher-level message while preserving the original as source.
    pub fn with_context(self, msg: impl Into<String>) -> Self {
        let category = self.category;
        let kind = self.kind;
        Self {
            category,
            kind,
            source: Some(Box::new(self)),
            msg: msg.into(),
        }
    }

    /// Re-tags the error under `kind` with a new message, keeping the
    /// original as source.
    pub(crate) fn reclassify(self, kind: ErrorKind, msg: impl Into<String>) -> Self {
        let category = self.category;
        Self {
            category,
            kind: Some(kind),
            source: Some(Box::new(self)),
            msg: msg.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SealnoteError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_with_context_keeps_kind_and_source() {
        let inner = SealnoteError::with_kind(
            ErrorCategory::User,
            ErrorKind::MalformedCiphertext,
            "bad characters",
        );
        let outer = inner.with_context("failed to read ciphertext");

        assert_eq!(outer.kind, Some(ErrorKind::MalformedCiphertext));
        assert_eq!(outer.category, ErrorCategory::User);
        assert_eq!(outer.message(), "failed to read ciphertext");
        assert_eq!(outer.source_error().unwrap().to_string(), "bad characters");
    }

    #[test]
    fn test_reclassify_replaces_kind() {
        let io_err = io::Error::new(io::ErrorKind::InvalidData, "truncated");
        let inner = SealnoteError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::Io,
            "read failed",
            io_err,
        );
        let outer = inner.reclassify(ErrorKind::DecryptionFailed, "could not decrypt");

        assert!(outer.is(ErrorKind::DecryptionFailed));
        assert_eq!(outer.to_string(), "could not decrypt");
        assert_eq!(outer.source_error().unwrap().to_string(), "read failed");
    }

    #[test]
    fn test_plain_error_has_no_kind() {
        let err = SealnoteError::new(ErrorCategory::Internal, "oops");
        assert_eq!(err.kind, None);
        assert!(err.source_error().is_none());
    }
}
