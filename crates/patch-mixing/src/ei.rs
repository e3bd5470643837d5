//! EI indices
//!
//! The EI index contrasts external (cross-group) ties with internal ties:
//! `(E - I) / (E + I)`. Values close to +1 indicate that nodes prefer the
//! other group; values close to -1 indicate segregation.

use patch_core::{GroupGraph, GroupPartition, NodeId};
use serde::{Deserialize, Serialize};

/// Edge counts by the groups of their endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCounts {
    /// Minority–minority edges
    pub minority: usize,
    /// Cross-group edges
    pub cross: usize,
    /// Majority–majority edges
    pub majority: usize,
}

impl EdgeCounts {
    /// Classify every edge by applying `is_minority` to both endpoints
    pub fn tally<I, F>(edges: I, is_minority: F) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
        F: Fn(NodeId) -> bool,
    {
        let mut counts = Self::default();
        for (u, v) in edges {
            match (is_minority(u), is_minority(v)) {
                (true, true) => counts.minority += 1,
                (false, false) => counts.majority += 1,
                _ => counts.cross += 1,
            }
        }
        counts
    }

    /// Tally the edges of a graph under a partition
    pub fn from_graph<G: GroupGraph>(graph: &G, partition: &GroupPartition) -> Self {
        Self::tally(graph.edges(), |node| partition.is_minority(node))
    }

    /// Within-group edges of either group
    pub fn homophilous(&self) -> usize {
        self.minority + self.majority
    }

    pub fn total(&self) -> usize {
        self.homophilous() + self.cross
    }

    /// Variant A: cross edges against all homophilous edges
    pub fn ei_index(&self) -> f64 {
        ratio(self.cross, self.homophilous())
    }

    /// Variant B: per-group indices plus the overall index
    pub fn ei_indices(&self) -> EiIndices {
        EiIndices {
            minority: ratio(self.cross, self.minority),
            majority: ratio(self.cross, self.majority),
            overall: self.ei_index(),
        }
    }
}

/// Per-group and overall EI indices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EiIndices {
    /// `(mM - mm) / (mM + mm)`
    pub minority: f64,
    /// `(mM - MM) / (mM + MM)`
    pub majority: f64,
    /// `(mM - h) / (mM + h)` with `h = mm + MM`
    pub overall: f64,
}

impl EiIndices {
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.minority, self.majority, self.overall)
    }
}

/// Which edge-mixing index to compute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MixingVariant {
    /// Single value, variant A
    #[default]
    Overall,
    /// Minority, majority and overall values, variant B
    PerGroup,
}

/// Result of [`mixing_indices`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MixingIndices {
    Single(f64),
    Triple(EiIndices),
}

impl MixingIndices {
    /// The overall index, present in both variants
    pub fn headline(&self) -> f64 {
        match self {
            Self::Single(value) => *value,
            Self::Triple(indices) => indices.overall,
        }
    }
}

/// Edge-mixing indices of an edge list
///
/// A zero denominator (no cross and no matching within-group edges) makes
/// the corresponding index NaN; it is never clamped.
///
/// # Examples
///
/// ```rust
/// use patch_mixing::{mixing_indices, MixingVariant};
///
/// let edges = [(0, 1), (1, 2), (2, 3)];
/// let is_minority = |node: usize| node < 2;
///
/// // one minority-minority, one cross, one majority-majority edge
/// let ei = mixing_indices(edges, is_minority, MixingVariant::Overall);
/// assert_eq!(ei.headline(), (1.0 - 2.0) / 3.0);
/// ```
pub fn mixing_indices<I, F>(edges: I, is_minority: F, variant: MixingVariant) -> MixingIndices
where
    I: IntoIterator<Item = (NodeId, NodeId)>,
    F: Fn(NodeId) -> bool,
{
    let counts = EdgeCounts::tally(edges, is_minority);
    match variant {
        MixingVariant::Overall => MixingIndices::Single(counts.ei_index()),
        MixingVariant::PerGroup => MixingIndices::Triple(counts.ei_indices()),
    }
}

fn ratio(external: usize, internal: usize) -> f64 {
    let e = external as f64;
    let i = internal as f64;
    // 0/0 stays NaN
    (e - i) / (e + i)
}
