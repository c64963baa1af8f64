//! TOML configuration
//!
//! ```toml
//! [defaults]
//! algorithm = "AES-256"
//! key_length = 32
//!
//! [logging]
//! filter = "warn"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::error::{ErrorCategory, ErrorKind, Result, SealnoteError};
use crate::keygen::DEFAULT_KEY_LENGTH;
use crate::validate::MIN_KEY_CHARS;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SEALNOTE_CONFIG";

const MAX_KEY_LENGTH: usize = 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SealnoteConfig {
    pub defaults: DefaultsSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsSection {
    pub algorithm: Algorithm,
    pub key_length: usize,
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            key_length: DEFAULT_KEY_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// `tracing_subscriber::EnvFilter` directive.
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl SealnoteConfig {
    fn validate(&self, path: &Path) -> Result<()> {
        let key_length = self.defaults.key_length;
        if !(MIN_KEY_CHARS..=MAX_KEY_LENGTH).contains(&key_length) {
            return Err(SealnoteError::with_kind(
                ErrorCategory::User,
                ErrorKind::InvalidConfig,
                format!(
                    "invalid config {}: key_length must be between {} and {}, got {}",
                    path.display(),
                    MIN_KEY_CHARS,
                    MAX_KEY_LENGTH,
                    key_length
                ),
            ));
        }
        Ok(())
    }
}

/// Parse and validate the config at `path`.
pub fn read_config(path: &Path) -> Result<SealnoteConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        SealnoteError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::InvalidConfig,
            format!("failed to read config {}: {}", path.display(), e),
            e,
        )
    })?;
    let config: SealnoteConfig = toml::from_str(&contents).map_err(|e| {
        SealnoteError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::InvalidConfig,
            format!("failed to parse config {}: {}", path.display(), e),
            e,
        )
    })?;
    config.validate(path)?;
    Ok(config)
}

/// Load configuration.
///
/// An explicit path must exist. Otherwise [`CONFIG_ENV`] is consulted, then
/// the XDG location; a missing file there means built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<SealnoteConfig> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    if let Some(path) = env_config_path() {
        return read_config(&path);
    }
    match default_config_path() {
        Some(path) if path.exists() => read_config(&path),
        _ => Ok(SealnoteConfig::default()),
    }
}

fn env_config_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// `$XDG_CONFIG_HOME/sealnote/config.toml`, else `$HOME/.config/sealnote/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_config_dir().map(|dir| dir.join("config.toml"))
}

fn xdg_config_dir() -> Option<PathBuf> {
    if let Some(value) = std::env::var_os("XDG_CONFIG_HOME") {
        if !value.is_empty() {
            return Some(PathBuf::from(value).join("sealnote"));
        }
    }
    std::env::var_os("HOME")
        .filter(|value| !value.is_empty())
        .map(|home| PathBuf::from(home).join(".config").join("sealnote"))
}
