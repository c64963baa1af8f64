//! Sealnote CLI - password-based message encryption
//!
//! Command-line interface for encrypting and decrypting text messages
//! with AES-256, ChaCha20 (Rabbit) or TripleDES under a shared password.

use clap::{ArgGroup, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use sealnote::config::{self, SealnoteConfig};
use sealnote::error::{ErrorCategory, ErrorKind, Result, SealnoteError};
use sealnote::passphrase::{PassphraseReader, ReaderPassphraseReader, TerminalPassphraseReader};
use sealnote::{
    Algorithm, StrengthLevel, decrypt_message, encrypt_message, file_ops, keygen,
    score_password_strength,
};

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "SEALNOTE_LOG";

#[derive(Parser)]
#[command(name = "sealnote")]
#[command(version)]
#[command(about = "Password-based message encryption.", long_about = None)]
struct Cli {
    /// Read password from stdin instead of from terminal
    #[arg(long, global = true)]
    passphrase_stdin: bool,

    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a message
    #[command(alias = "e")]
    #[command(group(ArgGroup::new("source").required(true).args(["input", "message"])))]
    Encrypt {
        /// Path to the file whose contents is to be encrypted
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Message text to encrypt
        #[arg(short, long, value_name = "TEXT")]
        message: Option<String>,

        /// Path to write the ciphertext to (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// AES-256, ChaCha20 or TripleDES
        #[arg(short, long, value_name = "ALGORITHM")]
        algorithm: Option<Algorithm>,
    },

    /// Decrypt a message
    #[command(alias = "d")]
    #[command(group(ArgGroup::new("source").required(true).args(["input", "ciphertext"])))]
    Decrypt {
        /// Path to the file holding the ciphertext
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Ciphertext to decrypt
        #[arg(short, long, value_name = "TEXT")]
        ciphertext: Option<String>,

        /// Path to write the message to (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// AES-256, ChaCha20 or TripleDES
        #[arg(short, long, value_name = "ALGORITHM")]
        algorithm: Option<Algorithm>,
    },

    /// Generate a random password
    #[command(alias = "k")]
    Keygen {
        /// Number of characters
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Rate the strength of a password
    #[command(alias = "s")]
    Strength,
}

fn main() {
    let cli = Cli::parse();

    let result = config::load_config(cli.config.as_deref()).and_then(|config| {
        init_tracing(&config);
        run(cli, &config)
    });

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, config: &SealnoteConfig) -> Result<()> {
    match cli.command {
        Commands::Encrypt {
            input,
            message,
            output,
            algorithm,
        } => {
            let algorithm = algorithm.unwrap_or(config.defaults.algorithm);
            let plaintext = match (input, message) {
                (Some(path), _) => file_ops::read_text_file(&path)?,
                (None, Some(text)) => text,
                (None, None) => return Err(missing_source("--input or --message")),
            };
            let password = get_passphrase_reader(cli.passphrase_stdin).read_password()?;
            warn_if_weak(&password);
            let ciphertext = encrypt_message(&plaintext, &password, algorithm)?;
            emit(output.as_deref(), &ciphertext)
        }
        Commands::Decrypt {
            input,
            ciphertext,
            output,
            algorithm,
        } => {
            let algorithm = algorithm.unwrap_or(config.defaults.algorithm);
            let ciphertext = match (input, ciphertext) {
                (Some(path), _) => file_ops::read_text_file(&path)?,
                (None, Some(text)) => text,
                (None, None) => return Err(missing_source("--input or --ciphertext")),
            };
            let password = get_passphrase_reader(cli.passphrase_stdin).read_password()?;
            let plaintext = Zeroizing::new(decrypt_message(
                &ciphertext,
                &password,
                algorithm,
            )?);
            emit(output.as_deref(), &plaintext)
        }
        Commands::Keygen { length } => {
            let length = length.unwrap_or(config.defaults.key_length);
            let key = keygen::generate_strong_key(length);
            let score = score_password_strength(&key);
            write_stdout(&format!("{}\n", key.as_str()))?;
            eprintln!("Strength: {} ({})", score.level(), score);
            Ok(())
        }
        Commands::Strength => {
            let mut reader = get_passphrase_reader(cli.passphrase_stdin);
            let password = reader.read_password()?;
            let score = score_password_strength(&password);
            write_stdout(&format!("{} {}\n", score.value(), score.level()))
        }
    }
}

fn get_passphrase_reader(use_stdin: bool) -> Box<dyn PassphraseReader> {
    if use_stdin {
        Box::new(ReaderPassphraseReader::new(Box::new(io::stdin())))
    } else {
        Box::new(TerminalPassphraseReader)
    }
}

fn init_tracing(config: &SealnoteConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn warn_if_weak(password: &str) {
    let score = score_password_strength(password);
    if score.level() < StrengthLevel::Moderate {
        eprintln!(
            "Warning: password strength is {} ({}); consider `sealnote keygen`",
            score.level(),
            score
        );
    }
}

fn emit(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => file_ops::write_file_secure(path, contents.as_bytes())
            .map_err(|e| e.with_context(format!("failed to write to {}", path.display()))),
        None => write_stdout(&format!("{}\n", contents)),
    }
}

fn write_stdout(contents: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(contents.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| {
            SealnoteError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                "failed to write to stdout",
                e,
            )
        })
}

fn missing_source(what: &str) -> SealnoteError {
    SealnoteError::with_kind(
        ErrorCategory::User,
        ErrorKind::MissingInput,
        format!("one of {} is required", what),
    )
}
