//! Positions in the accelerator topology
//!
//! A VCA system has a fixed number of card slots, each carrying a fixed number
//! of compute nodes. Every node may expose any number of named block devices.
//! Options live either in the global scope or at one of these positions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of card slots in a system
pub const CARD_SLOTS: usize = 8;

/// Number of compute nodes per card
pub const NODE_SLOTS: usize = 3;

/// The topology position an option belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "kebab-case")]
pub enum Scope {
    /// Options outside the card/node hierarchy
    Global,
    /// Options of one compute node
    Node { card: usize, node: usize },
    /// Options of one block device attached to a compute node
    BlockDevice {
        card: usize,
        node: usize,
        device: String,
    },
}

impl Scope {
    /// Scope of a compute node
    pub fn node(card: usize, node: usize) -> Self {
        Self::Node { card, node }
    }

    /// Scope of a block device on a compute node
    pub fn block_device(card: usize, node: usize, device: impl Into<String>) -> Self {
        Self::BlockDevice {
            card,
            node,
            device: device.into(),
        }
    }

    /// Card index, if the scope is inside the hierarchy
    pub fn card(&self) -> Option<usize> {
        match self {
            Self::Global => None,
            Self::Node { card, .. } | Self::BlockDevice { card, .. } => Some(*card),
        }
    }

    /// Node index, if the scope is inside the hierarchy
    pub fn node_id(&self) -> Option<usize> {
        match self {
            Self::Global => None,
            Self::Node { node, .. } | Self::BlockDevice { node, .. } => Some(*node),
        }
    }

    /// Block device name, if any
    pub fn device(&self) -> Option<&str> {
        match self {
            Self::BlockDevice { device, .. } => Some(device),
            _ => None,
        }
    }

    /// Positional arguments identifying this scope to the configuration tool
    pub fn tool_args(&self) -> Vec<String> {
        match self {
            Self::Global => Vec::new(),
            Self::Node { card, node } => vec![card.to_string(), node.to_string()],
            Self::BlockDevice { card, node, device } => {
                vec![card.to_string(), node.to_string(), device.clone()]
            }
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "(global)"),
            Self::Node { card, node } => write!(f, "for card {}, cpu {}", card, node),
            Self::BlockDevice { card, node, device } => {
                write!(f, "for card {}, cpu {}, {}", card, node, device)
            }
        }
    }
}

/// Iterate over every `(card, node)` slot in topology order
pub fn node_slots() -> impl Iterator<Item = (usize, usize)> {
    (0..CARD_SLOTS).flat_map(|card| (0..NODE_SLOTS).map(move |node| (card, node)))
}
