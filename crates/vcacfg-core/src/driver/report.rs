//! Run-scoped state and the run summary

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::classify::ChangeState;
use crate::resolve::ApplyValue;
use crate::strategy::Mode;
use crate::topology::Scope;

/// An option whose user value was kept over a changed default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningRecord {
    pub scope: Scope,
    pub option: String,
    /// The user value that was applied
    pub user: Option<String>,
    /// The new default the user value overrides
    pub new_default: Option<String>,
}

/// One option handed to the apply port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedOption {
    pub scope: Scope,
    pub option: String,
    pub state: ChangeState,
    pub action: Action,
    pub value: ApplyValue,
}

/// Mutable state of one merge run
///
/// Owned by the reconciler and readable after the run, including after a
/// run that stopped on a fatal option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub mode: Mode,
    /// Debug runs print tool invocations instead of executing them
    pub debug: bool,
    pub applied: Vec<AppliedOption>,
    pub warnings: Vec<WarningRecord>,
}

impl RunContext {
    pub fn new(mode: Mode, debug: bool) -> Self {
        Self {
            mode,
            debug,
            applied: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Whether any option was resolved with a warning
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Freeze the context into a report
    pub fn into_report(self) -> RunReport {
        RunReport {
            mode: self.mode,
            debug: self.debug,
            applied: self.applied,
            warnings: self.warnings,
        }
    }
}

/// Summary of a completed merge run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub mode: Mode,
    pub debug: bool,
    /// Options in the order they were applied
    pub applied: Vec<AppliedOption>,
    /// Warning-flagged options
    pub warnings: Vec<WarningRecord>,
}

impl RunReport {
    /// Whether any option was resolved with a warning
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Number of applied options that changed nothing
    pub fn unchanged_count(&self) -> usize {
        self.applied
            .iter()
            .filter(|a| a.action == Action::NoAction)
            .count()
    }

    /// Applied options for one scope
    pub fn for_scope<'a>(&'a self, scope: &'a Scope) -> impl Iterator<Item = &'a AppliedOption> {
        self.applied.iter().filter(move |a| a.scope == *scope)
    }
}
