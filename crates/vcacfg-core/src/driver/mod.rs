//! Reconciliation driver
//!
//! The [`Reconciler`] walks a [`MergePlan`] batch by batch. For every option
//! it classifies the value triple, asks the strategy for a decision (and the
//! operator, when the strategy defers), resolves the value and applies it.
//!
//! Processing is strictly sequential. The first fatal option stops the run:
//! options applied so far stay applied, the rest keep their pre-run values.

mod report;

pub use report::{AppliedOption, RunContext, RunReport, WarningRecord};

use crate::action::{Action, Decision};
use crate::apply::ApplyPort;
use crate::classify::{ChangeState, classify};
use crate::document::MergePlan;
use crate::entry::{OptionBatch, OptionEntry};
use crate::error::{Error, Result};
use crate::operator::{Operator, PromptRequest};
use crate::resolve::{ApplyValue, Resolution, resolve};
use crate::strategy::{DecisionPolicy, Mode, Strategy};
use crate::topology::Scope;

/// Drives one merge run
pub struct Reconciler {
    strategy: Strategy,
    context: RunContext,
}

impl Reconciler {
    /// Create a reconciler for a merge mode
    pub fn new(mode: Mode) -> Self {
        Self {
            strategy: Strategy::for_mode(mode),
            context: RunContext::new(mode, false),
        }
    }

    /// Mark the run as a debug run
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.context.debug = debug;
        self
    }

    /// Active strategy
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Run state so far; still meaningful after a failed run
    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// Reconcile every batch of the plan, in order
    pub fn run(
        &mut self,
        plan: &MergePlan,
        port: &mut dyn ApplyPort,
        operator: &mut dyn Operator,
    ) -> Result<RunReport> {
        tracing::info!(
            mode = %self.context.mode,
            batches = plan.batches.len(),
            options = plan.option_count(),
            "starting configuration merge"
        );

        for batch in &plan.batches {
            self.reconcile_batch(batch, port, operator)?;
        }

        tracing::info!(
            applied = self.context.applied.len(),
            warnings = self.context.warnings.len(),
            "configuration merge finished"
        );
        Ok(self.context.clone().into_report())
    }

    /// Reconcile the options of one scope, in collection order
    pub fn reconcile_batch(
        &mut self,
        batch: &OptionBatch,
        port: &mut dyn ApplyPort,
        operator: &mut dyn Operator,
    ) -> Result<()> {
        if !batch.is_empty() {
            tracing::debug!(scope = %batch.scope, options = batch.len(), "reconciling batch");
        }
        for entry in &batch.entries {
            self.reconcile_option(&batch.scope, entry, port, operator)?;
        }
        Ok(())
    }

    fn reconcile_option(
        &mut self,
        scope: &Scope,
        entry: &OptionEntry,
        port: &mut dyn ApplyPort,
        operator: &mut dyn Operator,
    ) -> Result<()> {
        let state = classify(entry).ok_or_else(|| Error::UndecidableInput {
            option: entry.name.clone(),
            scope: scope.to_string(),
            triple: entry.triple().to_string(),
        })?;

        let action = match self.strategy.decide(state, &entry.name, scope) {
            Decision::Act(action) => action,
            Decision::AskOperator => {
                let request = PromptRequest::new(scope.clone(), state, entry.clone());
                operator.choose(&request)?.action()
            }
        };

        tracing::debug!(
            option = %entry.name,
            scope = %scope,
            state = %state,
            action = %action,
            "decided update action"
        );

        let value = match resolve(action, entry) {
            Resolution::Apply(value) => value,
            Resolution::NeedsOperatorValue => {
                let request = PromptRequest::new(scope.clone(), state, entry.clone());
                ApplyValue::Text(ask_value(operator, &request)?)
            }
            Resolution::Fatal => return Err(fatal_error(action, state, scope, entry)),
        };

        if action == Action::WarnApplyUser {
            tracing::warn!(
                option = %entry.name,
                scope = %scope,
                new_default = entry.new.as_deref().unwrap_or(crate::entry::NOT_SET),
                "option has a new default value, keeping user value"
            );
            self.context.warnings.push(WarningRecord {
                scope: scope.clone(),
                option: entry.name.clone(),
                user: entry.user.clone(),
                new_default: entry.new.clone(),
            });
        }

        port.apply(scope, &entry.name, &value)?;

        self.context.applied.push(AppliedOption {
            scope: scope.clone(),
            option: entry.name.clone(),
            state,
            action,
            value,
        });
        Ok(())
    }
}

/// Ask for a fresh value until the operator supplies a non-empty one
fn ask_value(operator: &mut dyn Operator, request: &PromptRequest) -> Result<String> {
    loop {
        let value = operator.provide_value(request)?;
        if !value.trim().is_empty() {
            return Ok(value);
        }
        tracing::debug!(option = %request.option(), "empty value, asking again");
    }
}

fn fatal_error(action: Action, state: ChangeState, scope: &Scope, entry: &OptionEntry) -> Error {
    match action {
        Action::Error => Error::CorruptedUserConfig {
            option: entry.name.clone(),
            scope: scope.to_string(),
            triple: entry.triple().to_string(),
        },
        _ => Error::Undecidable {
            option: entry.name.clone(),
            scope: scope.to_string(),
            state: state.to_string(),
            triple: entry.triple().to_string(),
        },
    }
}
