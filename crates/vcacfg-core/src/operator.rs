//! Operator interaction port
//!
//! Strategies and the resolver never touch the terminal. Whenever a human has
//! to choose, the driver builds a [`PromptRequest`] and hands it to an
//! [`Operator`]. The CLI implements the port on top of terminal prompts; tests
//! script it.

use std::fmt::Write as _;

use crate::action::Action;
use crate::classify::ChangeState;
use crate::entry::{NOT_SET, OptionEntry};
use crate::error::{Error, Result};
use crate::topology::Scope;

/// Choice offered for a contested option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorChoice {
    /// 1. Apply USER value
    ApplyUser,
    /// 2. Use NEW default value
    NewDefault,
    /// 3. Choose new value
    FreshValue,
}

impl OperatorChoice {
    /// Menu number preselected when the operator just presses enter
    pub const DEFAULT_KEY: &'static str = "2";

    /// Parse a menu answer. Anything other than `1` or `3` selects the new
    /// default.
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "1" => Self::ApplyUser,
            "3" => Self::FreshValue,
            _ => Self::NewDefault,
        }
    }

    /// Action the choice stands for
    pub fn action(self) -> Action {
        match self {
            Self::ApplyUser => Action::ApplyUser,
            Self::NewDefault => Action::NewDefault,
            Self::FreshValue => Action::PromptOperator,
        }
    }
}

/// Everything an operator needs to see to settle one option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub scope: Scope,
    pub state: ChangeState,
    pub entry: OptionEntry,
}

impl PromptRequest {
    pub fn new(scope: Scope, state: ChangeState, entry: OptionEntry) -> Self {
        Self {
            scope,
            state,
            entry,
        }
    }

    /// Option name
    pub fn option(&self) -> &str {
        &self.entry.name
    }

    /// Description of the option and its three values
    pub fn describe(&self) -> String {
        let show = |v: &Option<String>| v.clone().unwrap_or_else(|| NOT_SET.to_string());
        let mut text = String::new();
        let _ = writeln!(text, "Option {}: {} is in:", self.scope, self.entry.name);
        let _ = writeln!(
            text,
            "\tOLD DEFAULT configuration: {}[{}]",
            self.state.old.describe(),
            show(&self.entry.old)
        );
        let _ = writeln!(
            text,
            "\tUSER configuration:        {}[{}]",
            self.state.user.describe(),
            show(&self.entry.user)
        );
        let _ = write!(
            text,
            "\tNEW DEFAULT configuration: {}[{}]",
            self.state.new.describe(),
            show(&self.entry.new)
        );
        text
    }

    /// The numbered menu offered after [`describe`](Self::describe)
    pub fn menu() -> &'static str {
        "Please choose what to do from given options:\n\
         \t1. Apply USER value.\n\
         \t2. Use NEW default value.\n\
         \t3. Choose new value."
    }
}

/// A human (or stand-in) able to settle contested options
pub trait Operator {
    /// Pick what to do with a contested option
    fn choose(&mut self, request: &PromptRequest) -> Result<OperatorChoice>;

    /// Supply a fresh value. Empty answers are asked again by the caller.
    fn provide_value(&mut self, request: &PromptRequest) -> Result<String>;
}

/// Operator for runs without a terminal; any question is an error
#[derive(Debug, Clone, Copy, Default)]
pub struct Unattended;

impl Operator for Unattended {
    fn choose(&mut self, request: &PromptRequest) -> Result<OperatorChoice> {
        Err(Error::Operator {
            message: format!(
                "no operator available to settle option {} {}",
                request.option(),
                request.scope
            ),
        })
    }

    fn provide_value(&mut self, request: &PromptRequest) -> Result<String> {
        Err(Error::Operator {
            message: format!(
                "no operator available to supply a value for {} {}",
                request.option(),
                request.scope
            ),
        })
    }
}
