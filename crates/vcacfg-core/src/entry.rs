//! Option value triples
//!
//! An [`OptionEntry`] holds one option's value in the old factory default,
//! the user configuration and the new factory default. `None` means the
//! option is absent from that document, which is distinct from empty text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::topology::Scope;

/// Placeholder shown for absent values
pub const NOT_SET: &str = "<not set>";

/// One configuration option seen through the three documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    /// Option name (the element tag in the documents)
    pub name: String,
    /// Value in the old factory default
    pub old: Option<String>,
    /// Value in the user configuration
    pub user: Option<String>,
    /// Value in the new factory default
    pub new: Option<String>,
}

impl OptionEntry {
    /// Create an entry from three optional values
    pub fn new(
        name: impl Into<String>,
        old: Option<&str>,
        user: Option<&str>,
        new: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            old: old.map(str::to_string),
            user: user.map(str::to_string),
            new: new.map(str::to_string),
        }
    }

    /// Create an entry with every slot absent
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            old: None,
            user: None,
            new: None,
        }
    }

    /// Borrowed view of the value triple
    pub fn triple(&self) -> Triple<'_> {
        Triple {
            old: self.old.as_deref(),
            user: self.user.as_deref(),
            new: self.new.as_deref(),
        }
    }
}

/// Borrowed `(old, user, new)` values, displayed as `[old, user, new]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triple<'a> {
    pub old: Option<&'a str>,
    pub user: Option<&'a str>,
    pub new: Option<&'a str>,
}

impl fmt::Display for Triple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}]",
            self.old.unwrap_or(NOT_SET),
            self.user.unwrap_or(NOT_SET),
            self.new.unwrap_or(NOT_SET)
        )
    }
}

/// All options of one scope, in collection order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionBatch {
    /// Scope shared by every entry
    pub scope: Scope,
    /// Entries in the order they were collected
    pub entries: Vec<OptionEntry>,
}

impl OptionBatch {
    /// Create an empty batch for a scope
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            entries: Vec::new(),
        }
    }

    /// Builder-style helper to append an entry
    pub fn with_entry(mut self, entry: OptionEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Number of options in the batch
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the batch holds no options
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
