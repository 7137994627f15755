//! Mapping decided actions back to concrete values

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::entry::OptionEntry;

/// The value handed to the configuration tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplyValue {
    /// Set the option to this text
    Text(String),
    /// Pass an empty value, removing the option
    Clear,
}

impl ApplyValue {
    /// Value from an optional slot; an absent slot clears the option
    pub fn from_slot(slot: Option<&str>) -> Self {
        match slot {
            Some(text) => Self::Text(text.to_string()),
            None => Self::Clear,
        }
    }

    /// Text passed as the tool's last argument
    pub fn as_arg(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Clear => "",
        }
    }
}

impl fmt::Display for ApplyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Clear => write!(f, "<cleared>"),
        }
    }
}

/// Result of resolving an action against an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Apply this value
    Apply(ApplyValue),
    /// The operator has to type a fresh value
    NeedsOperatorValue,
    /// The action carries no value; the run must stop
    Fatal,
}

/// Pick the value an action stands for.
///
/// `NoAction` keeps the old value, both user actions take the user value,
/// `NewDefault` takes the new default and `Delete` clears the option.
pub fn resolve(action: Action, entry: &OptionEntry) -> Resolution {
    match action {
        Action::NoAction => Resolution::Apply(ApplyValue::from_slot(entry.old.as_deref())),
        Action::ApplyUser | Action::WarnApplyUser => {
            Resolution::Apply(ApplyValue::from_slot(entry.user.as_deref()))
        }
        Action::NewDefault => Resolution::Apply(ApplyValue::from_slot(entry.new.as_deref())),
        Action::Delete => Resolution::Apply(ApplyValue::Clear),
        Action::PromptOperator => Resolution::NeedsOperatorValue,
        Action::Error | Action::Unreachable => Resolution::Fatal,
    }
}
