//! Run settings
//!
//! Settings are read from a TOML file. Every field has a default, so an
//! empty or missing file yields a working setup:
//!
//! ```toml
//! mode = "semi-auto"
//!
//! [tool]
//! program = "/usr/sbin/vcactl"
//! subcommand = "config"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::strategy::Mode;

/// Directory name under the platform config directory
pub const SETTINGS_DIR: &str = "vca-config-upgrade";

/// File name of the settings file
pub const SETTINGS_FILE: &str = "settings.toml";

/// How to invoke the configuration tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Program name or path
    pub program: String,
    /// Subcommand placed before the scope arguments
    pub subcommand: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            program: "vcactl".to_string(),
            subcommand: "config".to_string(),
        }
    }
}

/// Settings for one merge run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Configuration tool invocation
    pub tool: ToolSettings,
    /// Merge mode used when the command line names none
    pub mode: Option<Mode>,
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a file that must exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DocumentNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

/// Locates the settings file
///
/// An explicit path must exist. Without one, the platform config directory
/// is searched (`~/.config/vca-config-upgrade/settings.toml` on Linux) and a
/// missing file falls back to defaults.
#[derive(Debug, Clone, Default)]
pub struct SettingsResolver {
    explicit: Option<PathBuf>,
    config_dir_override: Option<PathBuf>,
}

impl SettingsResolver {
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self {
            explicit,
            config_dir_override: None,
        }
    }

    /// Use a custom directory instead of the platform config directory
    pub fn with_config_dir(mut self, dir: PathBuf) -> Self {
        self.config_dir_override = Some(dir);
        self
    }

    fn default_path(&self) -> Option<PathBuf> {
        let dir = match &self.config_dir_override {
            Some(dir) => dir.clone(),
            None => dirs::config_dir()?.join(SETTINGS_DIR),
        };
        Some(dir.join(SETTINGS_FILE))
    }

    /// Resolve the effective settings
    pub fn resolve(&self) -> Result<Settings> {
        if let Some(path) = &self.explicit {
            tracing::debug!(path = %path.display(), "loading settings");
            return Settings::load(path);
        }

        match self.default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading settings");
                Settings::load(&path)
            }
            _ => Ok(Settings::default()),
        }
    }
}
