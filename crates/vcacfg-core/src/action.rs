//! Update actions produced by decision strategies

use std::fmt;

use serde::{Deserialize, Serialize};

/// What to do with one option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Keep the old value
    NoAction,
    /// Apply the user value
    ApplyUser,
    /// Apply the user value and flag the option for review
    WarnApplyUser,
    /// Apply the new default value
    NewDefault,
    /// Remove the option
    Delete,
    /// Ask the operator for a fresh value
    PromptOperator,
    /// The user configuration is corrupted
    Error,
    /// The strategy has no rule for the change state
    Unreachable,
}

impl Action {
    /// Whether this action stops the run
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::Error | Self::Unreachable)
    }

    /// Stable snake-case name, as printed in debug output
    pub fn name(self) -> &'static str {
        match self {
            Self::NoAction => "no_action",
            Self::ApplyUser => "apply_user",
            Self::WarnApplyUser => "wrn_apply_user",
            Self::NewDefault => "new_default",
            Self::Delete => "delete",
            Self::PromptOperator => "new_usr",
            Self::Error => "error",
            Self::Unreachable => "unknown",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of asking a strategy about one option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The strategy settled on an action
    Act(Action),
    /// The operator has to pick between the user value, the new default
    /// and a fresh value
    AskOperator,
}

impl From<Action> for Decision {
    fn from(action: Action) -> Self {
        Self::Act(action)
    }
}
