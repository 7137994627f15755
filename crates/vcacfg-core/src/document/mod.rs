//! Configuration documents
//!
//! A [`ConfigSnapshot`] is one configuration document reduced to option
//! values per scope. Three snapshots (old default, user, new default) are
//! combined into a [`MergePlan`] of ordered option batches.

mod plan;
mod xml;

pub use plan::MergePlan;

use serde::{Deserialize, Serialize};

use crate::topology::{CARD_SLOTS, NODE_SLOTS};

/// Option values of one scope, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    values: Vec<(String, Option<String>)>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option. A repeated name keeps its first position and takes the
    /// latest value.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.values.push((name, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, name: &str, value: Option<&str>) -> Self {
        self.insert(name, value.map(str::to_string));
        self
    }

    /// Value of an option: `None` if the option is not listed, `Some(None)`
    /// if it is listed without a value
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref())
    }

    /// Value of an option, treating unlisted and valueless alike
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).flatten()
    }

    /// Option names in document order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Options of one compute node and its block devices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Options set directly on the node
    pub options: OptionSet,
    /// Block devices in document order
    pub devices: Vec<(String, OptionSet)>,
}

impl NodeConfig {
    /// Options of a block device, if the node lists it
    pub fn device(&self, name: &str) -> Option<&OptionSet> {
        self.devices.iter().find(|(n, _)| n == name).map(|(_, o)| o)
    }

    /// Options of a block device, adding the device if needed
    pub fn device_mut(&mut self, name: &str) -> &mut OptionSet {
        let idx = match self.devices.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.devices.push((name.to_string(), OptionSet::new()));
                self.devices.len() - 1
            }
        };
        &mut self.devices[idx].1
    }
}

/// One configuration document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// Global options
    pub global: OptionSet,
    nodes: Vec<NodeConfig>,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            global: OptionSet::new(),
            nodes: vec![NodeConfig::default(); CARD_SLOTS * NODE_SLOTS],
        }
    }
}

impl ConfigSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(card: usize, node: usize) -> usize {
        assert!(card < CARD_SLOTS && node < NODE_SLOTS, "node slot out of range");
        card * NODE_SLOTS + node
    }

    /// Options of a compute node.
    ///
    /// # Panics
    ///
    /// Panics if `card` or `node` is outside the topology.
    pub fn node(&self, card: usize, node: usize) -> &NodeConfig {
        &self.nodes[Self::slot(card, node)]
    }

    /// Mutable options of a compute node.
    ///
    /// # Panics
    ///
    /// Panics if `card` or `node` is outside the topology.
    pub fn node_mut(&mut self, card: usize, node: usize) -> &mut NodeConfig {
        &mut self.nodes[Self::slot(card, node)]
    }
}
