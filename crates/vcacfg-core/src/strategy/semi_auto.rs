//! Semi-automatic mode: table-driven for safe states, operator for conflicts

use crate::action::{Action, Decision};
use crate::classify::{ChangeState, Slot};
use crate::strategy::DecisionPolicy;
use crate::topology::Scope;

/// Favors user values, but asks the operator when the user value and a
/// changed default collide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SemiAutomatic;

impl DecisionPolicy for SemiAutomatic {
    fn decide(&self, state: ChangeState, _option: &str, _scope: &Scope) -> Decision {
        use Slot::{Default as D, Deleted as Del, Modified as M, NewDefault as Nd};

        match state.slots() {
            [D, D, D] => Action::NoAction.into(),
            [D, D, Nd] => Action::NewDefault.into(),
            [D, D, Del] => Action::Delete.into(),
            [D, M, D] => Action::ApplyUser.into(),
            [D, M, Nd] | [D, M, Del] => Decision::AskOperator,
            [D, Del, _] => Action::Error.into(),
            [Del, M, Del] => Action::ApplyUser.into(),
            [Del, M, Nd] => Action::NewDefault.into(),
            [Del, M, D] => Decision::AskOperator,
            // Brand-new option shipped only by the new default. Escalated
            // rather than adopted silently until the intended policy is settled.
            [Del, Del, Nd] => Action::Unreachable.into(),
            _ => Action::Unreachable.into(),
        }
    }
}
