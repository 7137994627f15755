//! Three-way change classification
//!
//! Every option is described by a [`ChangeState`]: one [`Slot`] per document,
//! comparing the old default, the user configuration and the new default
//! against the baseline (the old default).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::OptionEntry;

/// State of one document's value relative to the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Slot {
    /// Same value as the baseline
    Default,
    /// The user holds a value different from the baseline
    Modified,
    /// No value where the baseline had one
    Deleted,
    /// The new default differs from the baseline
    NewDefault,
}

impl Slot {
    /// Short code used in change vectors
    pub fn code(self) -> &'static str {
        match self {
            Self::Default => "d",
            Self::Modified => "m",
            Self::Deleted => "del",
            Self::NewDefault => "nd",
        }
    }

    /// Human-readable description used in operator prompts
    pub fn describe(self) -> &'static str {
        match self {
            Self::Default => "in default state",
            Self::Modified => "modified by user",
            Self::Deleted => "deleted",
            Self::NewDefault => "in NEW default state",
        }
    }
}

/// Change vector `(old, user, new)` of one option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeState {
    pub old: Slot,
    pub user: Slot,
    pub new: Slot,
}

impl ChangeState {
    pub const fn new(old: Slot, user: Slot, new: Slot) -> Self {
        Self { old, user, new }
    }

    /// Nothing changed anywhere
    pub const UNCHANGED: Self = Self::new(Slot::Default, Slot::Default, Slot::Default);
    /// Untouched by the user, new default value shipped
    pub const NEW_DEFAULT: Self = Self::new(Slot::Default, Slot::Default, Slot::NewDefault);
    /// Untouched by the user, dropped from the new default
    pub const DROPPED: Self = Self::new(Slot::Default, Slot::Default, Slot::Deleted);
    /// User edit over an unchanged default
    pub const USER_EDIT: Self = Self::new(Slot::Default, Slot::Modified, Slot::Default);
    /// User edit while the new default changed too
    pub const CONFLICT: Self = Self::new(Slot::Default, Slot::Modified, Slot::NewDefault);
    /// User edit of an option the new default dropped
    pub const EDITED_DROPPED: Self = Self::new(Slot::Default, Slot::Modified, Slot::Deleted);
    /// User removed an option whose default never moved
    pub const USER_DELETED: Self = Self::new(Slot::Default, Slot::Deleted, Slot::Default);
    /// Option introduced only by the new default
    pub const INTRODUCED: Self = Self::new(Slot::Deleted, Slot::Deleted, Slot::NewDefault);
    /// Option absent everywhere
    pub const ABSENT: Self = Self::new(Slot::Deleted, Slot::Deleted, Slot::Deleted);

    /// The slots as an array, in document order
    pub fn slots(&self) -> [Slot; 3] {
        [self.old, self.user, self.new]
    }
}

impl fmt::Display for ChangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}]",
            self.old.code(),
            self.user.code(),
            self.new.code()
        )
    }
}

/// Classify an option's value triple.
///
/// Rules apply in order, first match wins:
///
/// 1. `old == user`: unchanged, new default, or dropped depending on `new`
/// 2. `old != user` with a user value: the user edit wins over any narrower
///    "added by user" reading, including when `old` is absent
/// 3. user value absent while `old == new`: the user deleted the option
///
/// Triples with both `old` and `user` absent always match rule 1, so the
/// `Deleted/Deleted` states are never produced here.
///
/// Returns `None` for the one shape no rule covers: `old` present, `user`
/// absent and `new` different from `old`.
pub fn classify(entry: &OptionEntry) -> Option<ChangeState> {
    let old = entry.old.as_deref();
    let user = entry.user.as_deref();
    let new = entry.new.as_deref();

    if old == user {
        return Some(if user == new {
            ChangeState::UNCHANGED
        } else if new.is_some() {
            ChangeState::NEW_DEFAULT
        } else {
            ChangeState::DROPPED
        });
    }

    if user.is_some() {
        return Some(if new == old {
            ChangeState::USER_EDIT
        } else if new.is_none() {
            ChangeState::EDITED_DROPPED
        } else {
            ChangeState::CONFLICT
        });
    }

    if old == new {
        return Some(ChangeState::USER_DELETED);
    }

    None
}
