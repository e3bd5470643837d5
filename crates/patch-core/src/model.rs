//! Graph generator interface
//!
//! The statistics and the sweep treat graph generation as a black box: a
//! [`GraphGenerator`] turns a [`ModelName`] and [`ModelParams`] into a
//! [`Graph`]. Implementations live outside the core.

use crate::{Error, Graph, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generator model names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelName {
    /// Random global attachment with triadic closure and homophily
    #[serde(rename = "ERPATCH")]
    ErPatch,
    /// Homophilic global attachment with triadic closure
    #[serde(rename = "TCH")]
    Tch,
    /// Preferential attachment, triadic closure and homophily
    #[serde(rename = "PATCH")]
    Patch,
}

impl ModelName {
    pub const ALL: [Self; 3] = [Self::Tch, Self::Patch, Self::ErPatch];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ErPatch => "ERPATCH",
            Self::Tch => "TCH",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ERPATCH" => Ok(Self::ErPatch),
            "TCH" => Ok(Self::Tch),
            "PATCH" => Ok(Self::Patch),
            other => Err(Error::InvalidParameter(format!(
                "Unknown model name `{other}` (expected ERPATCH, TCH or PATCH)"
            ))),
        }
    }
}

/// Structural parameters handed to a generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// Number of nodes
    pub node_count: usize,
    /// Number of new edges per arriving node
    pub edges_per_node: usize,
    /// Fraction of minority nodes
    pub minority_fraction: f64,
    /// In-group homophily of the minority
    pub h_mm: f64,
    /// In-group homophily of the majority
    pub h_maj: f64,
    /// Probability to close a triangle instead of attaching globally
    pub tc: f64,
    /// Whether triadic closure picks uniformly among candidates
    pub tc_uniform: bool,
    /// Seed for reproducible generation
    pub seed: Option<u64>,
}

impl ModelParams {
    /// Parameters with symmetric homophily `h` for both groups
    pub fn symmetric(
        node_count: usize,
        edges_per_node: usize,
        minority_fraction: f64,
        homophily: f64,
        tc: f64,
        tc_uniform: bool,
    ) -> Self {
        Self {
            node_count,
            edges_per_node,
            minority_fraction,
            h_mm: homophily,
            h_maj: homophily,
            tc,
            tc_uniform,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject parameters no model can honour
    pub fn validate(&self) -> Result<()> {
        if self.node_count == 0 {
            return Err(Error::InvalidParameter("node_count must be positive".to_string()));
        }
        if self.edges_per_node == 0 {
            return Err(Error::InvalidParameter(
                "edges_per_node must be positive".to_string(),
            ));
        }
        if !(self.minority_fraction > 0.0 && self.minority_fraction < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "minority_fraction={} must be in (0, 1)",
                self.minority_fraction
            )));
        }
        for (name, p) in [("h_mm", self.h_mm), ("h_MM", self.h_maj), ("tc", self.tc)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::invalid_probability(name, p));
            }
        }
        Ok(())
    }
}

/// Produces one graph per call
///
/// Implementations must be shareable across worker threads; each call is
/// independent and must not rely on state left by earlier calls.
pub trait GraphGenerator: Send + Sync {
    fn generate(&self, model: ModelName, params: &ModelParams) -> Result<Graph>;
}
