//! Link formation weights
//!
//! A new node picks each target among the existing nodes with a weight that
//! depends on the model's global mechanism.

use patch_core::{Graph, Group, GroupGraph, ModelName, ModelParams, NodeId};

/// Added to every degree so that isolated nodes remain reachable
pub const EPSILON: f64 = 1e-5;

/// Global link formation mechanism of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalMechanism {
    /// Every candidate equally likely
    Uniform,
    /// Weighted by group similarity
    Homophily,
    /// Weighted by group similarity times degree
    PreferentialHomophily,
}

impl From<ModelName> for GlobalMechanism {
    fn from(model: ModelName) -> Self {
        match model {
            ModelName::ErPatch => Self::Uniform,
            ModelName::Tch => Self::Homophily,
            ModelName::Patch => Self::PreferentialHomophily,
        }
    }
}

/// Weights seen by one arriving node
pub(crate) struct Attachment<'a> {
    graph: &'a Graph,
    mechanism: GlobalMechanism,
    /// Weight of a same-group target
    same: f64,
    /// Weight of an other-group target
    other: f64,
    source_group: Group,
}

impl<'a> Attachment<'a> {
    pub(crate) fn new(
        graph: &'a Graph,
        mechanism: GlobalMechanism,
        params: &ModelParams,
        source_group: Group,
    ) -> Self {
        let same = match source_group {
            Group::Minority => params.h_mm,
            Group::Majority => params.h_maj,
        };
        Self {
            graph,
            mechanism,
            same,
            other: 1.0 - same,
            source_group,
        }
    }

    pub(crate) fn is_uniform(&self) -> bool {
        self.mechanism == GlobalMechanism::Uniform
    }

    fn homophily(&self, target: NodeId) -> f64 {
        if self.graph.group(target) == Some(self.source_group) {
            self.same
        } else {
            self.other
        }
    }

    /// Unnormalised probability of linking to `target`
    pub(crate) fn weight(&self, target: NodeId) -> f64 {
        match self.mechanism {
            GlobalMechanism::Uniform => 1.0,
            GlobalMechanism::Homophily => self.homophily(target),
            GlobalMechanism::PreferentialHomophily => {
                let degree = self.graph.degree(target).unwrap_or(0) as f64;
                self.homophily(target) * (degree + EPSILON)
            }
        }
    }
}
