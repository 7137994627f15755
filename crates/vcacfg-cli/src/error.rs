//! Error types for vcacfg-cli

use vcacfg_core::Error as CoreError;
use vcacfg_core::error::EXIT_MERGE_FAILED;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from vcacfg-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Command line does not name three XML documents
    #[error(
        "Bad arguments passed! First 3 arguments have to be the XML configuration files or 1st argument has to be: \"help\" ({message})"
    )]
    BadArguments { message: String },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    pub fn bad_arguments(message: impl Into<String>) -> Self {
        Self::BadArguments {
            message: message.into(),
        }
    }

    /// Process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(e) => e.exit_code(),
            Self::BadArguments { .. } => EXIT_MERGE_FAILED,
            Self::Io(_) | Self::User { .. } => 1,
        }
    }

    /// Lines explaining how to recover from a failed merge run
    pub fn recovery_hints(&self) -> Vec<String> {
        let Self::Core(err) = self else {
            return Vec::new();
        };

        const APPLIED_STATE: &str = "Options handled before the failure were already set to their merged values; the remaining options keep their current values.";

        let mut hints = match err {
            CoreError::CorruptedUserConfig { .. } => vec![
                "Bad USER XML configuration was passed. You probably deleted the option by editing the configuration file directly.".to_string(),
            ],
            // Fails before any mode decides, so rerunning in another mode does not help
            CoreError::UndecidableInput { .. } => {
                return vec![
                    "The USER XML configuration drops an option that the new default still changes. Restore the option in the USER file or set it with 'vcactl', then rerun.".to_string(),
                    APPLIED_STATE.to_string(),
                ];
            }
            CoreError::Undecidable { .. } => vec![
                "Merge ran into a conflict that can not be resolved in automatic mode.".to_string(),
            ],
            CoreError::ApplyFailed { stderr, .. } => {
                let mut lines = vec!["vcactl error occurred. Aborting.".to_string()];
                if !stderr.is_empty() {
                    lines.push(format!("Tool output: {}", stderr));
                }
                lines
            }
            _ => return Vec::new(),
        };

        hints.push(APPLIED_STATE.to_string());
        hints.push(
            "You can change them using 'vcactl' or by running this tool in manual or semi-auto mode:"
                .to_string(),
        );
        hints.push("\tvca-config-upgrade <old.xml> <user.xml> <new.xml> manual".to_string());
        hints.push("\tvca-config-upgrade <old.xml> <user.xml> <new.xml> semi-auto".to_string());
        hints
    }
}
