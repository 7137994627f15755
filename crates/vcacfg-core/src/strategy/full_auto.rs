//! Full automatic mode: never asks, keeps user values where possible

use crate::action::{Action, Decision};
use crate::classify::{ChangeState, Slot};
use crate::strategy::DecisionPolicy;
use crate::topology::Scope;

/// Applies the user value whenever one exists. When the default moved
/// underneath a user edit the edit is still kept, but flagged with a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullAutomatic;

impl DecisionPolicy for FullAutomatic {
    fn decide(&self, state: ChangeState, _option: &str, _scope: &Scope) -> Decision {
        use Slot::{Default as D, Deleted as Del, Modified as M, NewDefault as Nd};

        let action = match state.slots() {
            [D, M, D] => Action::ApplyUser,
            [D | Del, M, Del] => Action::ApplyUser,
            [D | Del, M, D | Nd] => Action::WarnApplyUser,
            [D, Del, D] => Action::Error,
            [_, _, Del] => Action::Delete,
            [D, D, D] => Action::NoAction,
            [D, D, Nd] => Action::NewDefault,
            // Brand-new option shipped only by the new default. Escalated
            // rather than adopted silently until the intended policy is settled.
            [Del, Del, Nd] => Action::Unreachable,
            _ => Action::Unreachable,
        };
        action.into()
    }
}
