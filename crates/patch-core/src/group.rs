//! Minority / majority group labels and node partitions

use crate::graph::{GroupGraph, NodeId};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Name of the per-node class attribute in serialized graphs
pub const CLASS_ATTRIBUTE: &str = "m";

/// Class attribute value marking minority nodes
pub const MINORITY_VALUE: u8 = 1;

/// Class attribute value marking majority nodes
pub const MAJORITY_VALUE: u8 = 0;

/// Binary group label carried by every node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    /// The larger group
    Majority,
    /// The smaller group
    Minority,
}

impl Group {
    /// The class attribute value used in serialized graphs
    pub const fn label(self) -> u8 {
        match self {
            Self::Majority => MAJORITY_VALUE,
            Self::Minority => MINORITY_VALUE,
        }
    }

    /// Parse a class attribute value
    pub fn from_label(label: u8) -> Result<Self> {
        match label {
            MAJORITY_VALUE => Ok(Self::Majority),
            MINORITY_VALUE => Ok(Self::Minority),
            other => Err(Error::InvalidInput(format!(
                "Unknown class attribute value {other}"
            ))),
        }
    }

    pub const fn is_minority(self) -> bool {
        matches!(self, Self::Minority)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Majority => write!(f, "majority"),
            Self::Minority => write!(f, "minority"),
        }
    }
}

/// Partition of a graph's nodes into minority and majority
///
/// Every node id below `node_count` belongs to exactly one side. The
/// partition is fixed once built; it describes one graph snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPartition {
    minority: HashSet<NodeId>,
    node_count: usize,
}

impl GroupPartition {
    /// Derive the partition from the graph's own group labels
    pub fn from_graph<G: GroupGraph>(graph: &G) -> Self {
        let minority = graph
            .nodes()
            .filter(|&node| graph.group(node).is_some_and(Group::is_minority))
            .collect();
        Self {
            minority,
            node_count: graph.node_count(),
        }
    }

    /// Build a partition from an explicit minority set
    pub fn from_minority<I>(minority: I, node_count: usize) -> Result<Self>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let minority: HashSet<NodeId> = minority.into_iter().collect();
        if let Some(&node) = minority.iter().find(|&&node| node >= node_count) {
            return Err(Error::unknown_node(node, node_count));
        }
        Ok(Self {
            minority,
            node_count,
        })
    }

    /// Membership test used by every group-aware statistic
    pub fn is_minority(&self, node: NodeId) -> bool {
        self.minority.contains(&node)
    }

    pub fn group_of(&self, node: NodeId) -> Group {
        if self.is_minority(node) {
            Group::Minority
        } else {
            Group::Majority
        }
    }

    pub fn minority(&self) -> &HashSet<NodeId> {
        &self.minority
    }

    pub fn minority_count(&self) -> usize {
        self.minority.len()
    }

    pub fn majority_count(&self) -> usize {
        self.node_count - self.minority.len()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }
}
