//! Decision strategies
//!
//! A strategy maps an option's [`ChangeState`] to a [`Decision`]. Three
//! policies exist and one is chosen per run:
//!
//! - [`Manual`]: asks the operator about every option
//! - [`SemiAutomatic`]: settles the safe cases, asks about conflicts
//! - [`FullAutomatic`]: never asks, keeps user values and warns on conflicts
//!
//! All three agree on the non-conflicting cases and treat a user-deleted,
//! never-changed option as a corrupted user configuration.

mod full_auto;
mod manual;
mod semi_auto;

pub use full_auto::FullAutomatic;
pub use manual::Manual;
pub use semi_auto::SemiAutomatic;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::Decision;
use crate::classify::ChangeState;
use crate::error::Error;
use crate::topology::Scope;

/// A pure mapping from change state to decision.
///
/// Implementations must not read the terminal; anything that needs the
/// operator is returned as [`Decision::AskOperator`].
pub trait DecisionPolicy {
    /// Decide what to do with `option` at `scope`, currently in `state`
    fn decide(&self, state: ChangeState, option: &str, scope: &Scope) -> Decision;
}

/// Merge mode, selected once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Manual,
    SemiAuto,
    #[default]
    FullAuto,
}

impl Mode {
    /// All mode names accepted on the command line
    pub fn all_names() -> &'static [&'static str] {
        &["manual", "semi-auto", "full-auto"]
    }

    /// Name shown in the run banner
    pub fn title(self) -> &'static str {
        match self {
            Self::Manual => "Manual mode",
            Self::SemiAuto => "Semi-auto mode",
            Self::FullAuto => "Full automatic mode",
        }
    }

    /// Whether the mode may consult the operator
    pub fn is_interactive(self) -> bool {
        !matches!(self, Self::FullAuto)
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "semi-auto" => Ok(Self::SemiAuto),
            "full-auto" => Ok(Self::FullAuto),
            _ => Err(Error::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::SemiAuto => write!(f, "semi-auto"),
            Self::FullAuto => write!(f, "full-auto"),
        }
    }
}

/// The strategy chosen for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Manual(Manual),
    SemiAutomatic(SemiAutomatic),
    FullAutomatic(FullAutomatic),
}

impl Strategy {
    /// Strategy implementing a merge mode
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Manual => Self::Manual(Manual),
            Mode::SemiAuto => Self::SemiAutomatic(SemiAutomatic),
            Mode::FullAuto => Self::FullAutomatic(FullAutomatic),
        }
    }

    /// Merge mode this strategy implements
    pub fn mode(&self) -> Mode {
        match self {
            Self::Manual(_) => Mode::Manual,
            Self::SemiAutomatic(_) => Mode::SemiAuto,
            Self::FullAutomatic(_) => Mode::FullAuto,
        }
    }
}

impl From<Mode> for Strategy {
    fn from(mode: Mode) -> Self {
        Self::for_mode(mode)
    }
}

impl DecisionPolicy for Strategy {
    fn decide(&self, state: ChangeState, option: &str, scope: &Scope) -> Decision {
        match self {
            Self::Manual(s) => s.decide(state, option, scope),
            Self::SemiAutomatic(s) => s.decide(state, option, scope),
            Self::FullAutomatic(s) => s.decide(state, option, scope),
        }
    }
}
