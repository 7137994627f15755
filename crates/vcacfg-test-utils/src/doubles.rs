//! Test doubles for the reconciler's ports.

use std::collections::VecDeque;

use vcacfg_core::{
    ApplyPort, ApplyValue, Error, Operator, OperatorChoice, PromptRequest, Result, Scope,
};

/// One recorded apply call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyCall {
    pub scope: Scope,
    pub option: String,
    pub value: ApplyValue,
}

/// Apply port that records calls and can fail on demand
#[derive(Debug, Default)]
pub struct RecordingPort {
    pub calls: Vec<ApplyCall>,
    fail_at: Option<(usize, i32)>,
}

impl RecordingPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `index`-th call (zero-based) with the given exit code
    pub fn failing_at(index: usize, exit_code: i32) -> Self {
        Self {
            calls: Vec::new(),
            fail_at: Some((index, exit_code)),
        }
    }

    /// Recorded call for an option at a scope
    pub fn find(&self, scope: &Scope, option: &str) -> Option<&ApplyCall> {
        self.calls
            .iter()
            .find(|c| c.scope == *scope && c.option == option)
    }

    /// Value applied to an option at a scope
    pub fn value_of(&self, scope: &Scope, option: &str) -> Option<&ApplyValue> {
        self.find(scope, option).map(|c| &c.value)
    }
}

impl ApplyPort for RecordingPort {
    fn apply(&mut self, scope: &Scope, option: &str, value: &ApplyValue) -> Result<()> {
        if let Some((index, exit_code)) = self.fail_at
            && index == self.calls.len()
        {
            return Err(Error::ApplyFailed {
                command: format!("vcactl config {:?} {} {}", scope.tool_args(), option, value.as_arg()),
                exit_code,
                stderr: "simulated failure".to_string(),
            });
        }
        self.calls.push(ApplyCall {
            scope: scope.clone(),
            option: option.to_string(),
            value: value.clone(),
        });
        Ok(())
    }
}

/// Operator that replays scripted answers and records every request
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    choices: VecDeque<OperatorChoice>,
    values: VecDeque<String>,
    /// Requests passed to `choose`, in order
    pub choice_requests: Vec<PromptRequest>,
    /// Requests passed to `provide_value`, in order
    pub value_requests: Vec<PromptRequest>,
}

impl ScriptedOperator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue menu answers
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = OperatorChoice>) -> Self {
        self.choices.extend(choices);
        self
    }

    /// Queue typed values
    pub fn with_values<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.values.extend(values.into_iter().map(Into::into));
        self
    }
}

impl Operator for ScriptedOperator {
    fn choose(&mut self, request: &PromptRequest) -> Result<OperatorChoice> {
        self.choice_requests.push(request.clone());
        self.choices.pop_front().ok_or_else(|| Error::Operator {
            message: format!("no scripted choice for {}", request.option()),
        })
    }

    fn provide_value(&mut self, request: &PromptRequest) -> Result<String> {
        self.value_requests.push(request.clone());
        self.values.pop_front().ok_or_else(|| Error::Operator {
            message: format!("no scripted value for {}", request.option()),
        })
    }
}
