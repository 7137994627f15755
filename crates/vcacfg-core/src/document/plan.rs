//! Combining three snapshots into an ordered merge plan

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{ConfigSnapshot, OptionSet};
use crate::entry::{OptionBatch, OptionEntry};
use crate::topology::{Scope, node_slots};

/// Option batches in application order
///
/// The global batch comes first. Then, for every card and node in topology
/// order, the node's own batch followed by one batch per block device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergePlan {
    pub batches: Vec<OptionBatch>,
}

impl MergePlan {
    /// Build the plan from the old default, user and new default documents
    pub fn combine(old: &ConfigSnapshot, user: &ConfigSnapshot, new: &ConfigSnapshot) -> Self {
        let mut batches = vec![OptionBatch {
            scope: Scope::Global,
            entries: combine_sets([&old.global, &user.global, &new.global]),
        }];

        for (card, node) in node_slots() {
            let nodes = [old.node(card, node), user.node(card, node), new.node(card, node)];

            batches.push(OptionBatch {
                scope: Scope::node(card, node),
                entries: combine_sets(nodes.map(|n| &n.options)),
            });

            let device_names = ordered_union(
                nodes
                    .iter()
                    .flat_map(|n| n.devices.iter().map(|(name, _)| name.as_str())),
            );
            for device in device_names {
                let empty = OptionSet::new();
                let sets = nodes.map(|n| n.device(device).unwrap_or(&empty));
                batches.push(OptionBatch {
                    scope: Scope::block_device(card, node, device),
                    entries: combine_sets(sets),
                });
            }
        }

        Self { batches }
    }

    /// Total number of options across all batches
    pub fn option_count(&self) -> usize {
        self.batches.iter().map(OptionBatch::len).sum()
    }
}

/// Merge three option sets into entries, ordered by first appearance in
/// old, then user, then new
fn combine_sets(sets: [&OptionSet; 3]) -> Vec<OptionEntry> {
    let [old, user, new] = sets;
    ordered_union(sets.iter().flat_map(|s| s.names()))
        .into_iter()
        .map(|name| OptionEntry {
            name: name.to_string(),
            old: old.value(name).map(str::to_string),
            user: user.value(name).map(str::to_string),
            new: new.value(name).map(str::to_string),
        })
        .collect()
}

fn ordered_union<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    names.filter(|name| seen.insert(*name)).collect()
}
