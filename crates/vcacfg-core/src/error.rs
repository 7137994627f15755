//! Error types for vcacfg-core

use std::path::PathBuf;

/// Result type for vcacfg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code reported for load failures and fatal merge decisions
pub const EXIT_MERGE_FAILED: i32 = 3;

/// Exit code reported for everything that has no dedicated code
pub const EXIT_GENERIC: i32 = 1;

/// Errors that can occur while loading, reconciling or applying configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration document could not be opened
    #[error("Cannot open file: {path}")]
    DocumentNotFound { path: PathBuf },

    /// Configuration document is not well-formed XML
    #[error("Cannot parse {path}: {message}")]
    DocumentParse { path: PathBuf, message: String },

    /// Configuration document is XML but does not follow the expected layout
    #[error("Malformed configuration document: {message}")]
    MalformedDocument { message: String },

    /// Unknown merge mode name
    #[error("Invalid mode: {mode}")]
    InvalidMode { mode: String },

    /// The user configuration dropped an option whose default never changed
    #[error("USER configuration is corrupted. Missing option: {option} {scope} {triple}")]
    CorruptedUserConfig {
        option: String,
        scope: String,
        triple: String,
    },

    /// The value triple does not map to any change state
    #[error("Can not classify option: {option} {scope} {triple}")]
    UndecidableInput {
        option: String,
        scope: String,
        triple: String,
    },

    /// The active strategy has no decision for the change state
    #[error("Can not decide what update action take on option: {option} {scope} changes vector: {state} {triple}")]
    Undecidable {
        option: String,
        scope: String,
        state: String,
        triple: String,
    },

    /// The configuration tool exited with a non-zero status
    #[error("Configuration tool failed (exit code {exit_code}): {command}")]
    ApplyFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// The operator could not be asked for a decision
    #[error("Operator prompt failed: {message}")]
    Operator { message: String },

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error stopped a merge run part way through.
    ///
    /// Such runs leave already-applied options in place and everything else
    /// at its pre-run value.
    pub fn is_fatal_merge(&self) -> bool {
        matches!(
            self,
            Self::CorruptedUserConfig { .. }
                | Self::UndecidableInput { .. }
                | Self::Undecidable { .. }
                | Self::ApplyFailed { .. }
        )
    }

    /// Whether this error happened while reading the input documents
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::DocumentNotFound { .. }
                | Self::DocumentParse { .. }
                | Self::MalformedDocument { .. }
        )
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ApplyFailed { exit_code, .. } => *exit_code,
            Self::CorruptedUserConfig { .. }
            | Self::UndecidableInput { .. }
            | Self::Undecidable { .. } => EXIT_MERGE_FAILED,
            e if e.is_load_failure() => EXIT_MERGE_FAILED,
            _ => EXIT_GENERIC,
        }
    }
}
