//! Manual mode: the operator settles every option that changed

use crate::action::{Action, Decision};
use crate::classify::ChangeState;
use crate::strategy::DecisionPolicy;
use crate::topology::Scope;

/// Asks the operator about every option, except where the three documents
/// leave nothing to choose.
///
/// An option the user deleted while its default never moved is reported as
/// a corrupted user configuration. An option nobody touched keeps its value,
/// and a user edit over an unchanged default is applied as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manual;

impl DecisionPolicy for Manual {
    fn decide(&self, state: ChangeState, _option: &str, _scope: &Scope) -> Decision {
        match state {
            ChangeState::USER_DELETED => Action::Error.into(),
            ChangeState::UNCHANGED => Action::NoAction.into(),
            ChangeState::USER_EDIT => Action::ApplyUser.into(),
            _ => Decision::AskOperator,
        }
    }
}
