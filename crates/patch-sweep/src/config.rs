//! Sweep configuration

use crate::error::{Result, SweepError};
use crate::mechanism::Lfm;
use clap::ValueEnum;
use patch_core::ModelName;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_RESULTS_PATH: &str = "./data/aggregate_statistics/aggregate_statistics.csv";
pub const DEFAULT_NODE_COUNT: usize = 5000;
pub const DEFAULT_EDGES_PER_NODE: usize = 2;
pub const DEFAULT_MINORITY_FRACTIONS: [f64; 1] = [0.3];
pub const DEFAULT_HOMOPHILY: [f64; 5] = [0.01, 0.2, 0.5, 0.8, 0.99];
pub const DEFAULT_TRIADIC_CLOSURE: [f64; 5] = [0.0, 0.2, 0.5, 0.8, 1.0];
pub const DEFAULT_REALIZATIONS: usize = 50;

/// Columns of the results CSV
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RowLayout {
    /// `f,h,tc,lfm_local,lfm_global,r,gini,ei,stoch_dom`
    #[default]
    Mechanisms,
    /// `f,h,tc,tcu,r,model_name,gini,ei,stoch_dom`
    Models,
}

/// How the link formation axis of the grid is spanned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MechanismAxis {
    /// Every global × local pair; invalid pairs are skipped
    Mechanisms { global: Vec<Lfm>, local: Vec<Lfm> },
    /// Every model × closure uniformity (`false`, plus `true` with
    /// `include_tcu`); untranslatable pairs are skipped
    Models {
        models: Vec<ModelName>,
        include_tcu: bool,
    },
}

impl Default for MechanismAxis {
    fn default() -> Self {
        Self::Mechanisms {
            global: Lfm::ALL.to_vec(),
            local: Lfm::ALL.to_vec(),
        }
    }
}

impl MechanismAxis {
    fn is_empty(&self) -> bool {
        match self {
            Self::Mechanisms { global, local } => global.is_empty() || local.is_empty(),
            Self::Models { models, .. } => models.is_empty(),
        }
    }
}

/// Parameter grid, pool size and output locations of one sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub node_count: usize,
    pub edges_per_node: usize,
    pub minority_fractions: Vec<f64>,
    pub homophily: Vec<f64>,
    pub triadic_closure: Vec<f64>,
    pub mechanisms: MechanismAxis,
    pub realizations: usize,
    /// Worker threads; 0 means one per CPU
    pub workers: usize,
    pub results_path: PathBuf,
    /// Directory for node-link JSON dumps, disabled when `None`
    pub graphs_dir: Option<PathBuf>,
    pub layout: RowLayout,
    /// Base seed; task `i` uses `seed + i`
    pub seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            edges_per_node: DEFAULT_EDGES_PER_NODE,
            minority_fractions: DEFAULT_MINORITY_FRACTIONS.to_vec(),
            homophily: DEFAULT_HOMOPHILY.to_vec(),
            triadic_closure: DEFAULT_TRIADIC_CLOSURE.to_vec(),
            mechanisms: MechanismAxis::default(),
            realizations: DEFAULT_REALIZATIONS,
            workers: 1,
            results_path: PathBuf::from(DEFAULT_RESULTS_PATH),
            graphs_dir: None,
            layout: RowLayout::default(),
            seed: None,
        }
    }
}

impl SweepConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    pub fn with_edges_per_node(mut self, edges_per_node: usize) -> Self {
        self.edges_per_node = edges_per_node;
        self
    }

    pub fn with_minority_fractions(mut self, fractions: impl Into<Vec<f64>>) -> Self {
        self.minority_fractions = fractions.into();
        self
    }

    pub fn with_homophily(mut self, homophily: impl Into<Vec<f64>>) -> Self {
        self.homophily = homophily.into();
        self
    }

    pub fn with_triadic_closure(mut self, tc: impl Into<Vec<f64>>) -> Self {
        self.triadic_closure = tc.into();
        self
    }

    pub fn with_mechanisms(
        mut self,
        global: impl Into<Vec<Lfm>>,
        local: impl Into<Vec<Lfm>>,
    ) -> Self {
        self.mechanisms = MechanismAxis::Mechanisms {
            global: global.into(),
            local: local.into(),
        };
        self
    }

    pub fn with_models(mut self, models: impl Into<Vec<ModelName>>, include_tcu: bool) -> Self {
        self.mechanisms = MechanismAxis::Models {
            models: models.into(),
            include_tcu,
        };
        self
    }

    pub fn with_realizations(mut self, realizations: usize) -> Self {
        self.realizations = realizations;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_results_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.results_path = path.into();
        self
    }

    pub fn with_graphs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.graphs_dir = Some(dir.into());
        self
    }

    pub fn with_layout(mut self, layout: RowLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Worker count with 0 resolved to the number of CPUs
    pub fn resolved_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }

    /// Reject grids no generator can run
    pub fn validate(&self) -> Result<()> {
        if self.node_count == 0 {
            return Err(invalid("node count must be positive"));
        }
        if self.edges_per_node == 0 {
            return Err(invalid("edges per node must be positive"));
        }
        if self.realizations == 0 {
            return Err(invalid("realizations must be positive"));
        }
        if self.resolved_workers() == 0 {
            return Err(invalid("at least one worker is required"));
        }
        if self.minority_fractions.is_empty()
            || self.homophily.is_empty()
            || self.triadic_closure.is_empty()
            || self.mechanisms.is_empty()
        {
            return Err(invalid("every grid axis needs at least one value"));
        }
        if let Some(f) = self
            .minority_fractions
            .iter()
            .find(|&&f| !(f > 0.0 && f < 1.0))
        {
            return Err(invalid(&format!("minority fraction {f} must be in (0, 1)")));
        }
        for (name, values) in [("homophily", &self.homophily), ("tc", &self.triadic_closure)] {
            if let Some(p) = values.iter().find(|p| !(0.0..=1.0).contains(*p)) {
                return Err(invalid(&format!("{name} {p} must be in [0, 1]")));
            }
        }
        Ok(())
    }
}

fn invalid(message: &str) -> SweepError {
    SweepError::InvalidConfig(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SweepConfig::default();
        assert_eq!(config.node_count, 5000);
        assert_eq!(config.edges_per_node, 2);
        assert_eq!(config.homophily, vec![0.01, 0.2, 0.5, 0.8, 0.99]);
        assert_eq!(config.realizations, 50);
        assert_eq!(config.workers, 1);
        assert_eq!(config.layout, RowLayout::Mechanisms);
        assert!(config.graphs_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_means_all_cpus() {
        let config = SweepConfig::default().with_workers(0);
        assert!(config.resolved_workers() >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let cases = [
            SweepConfig::default().with_node_count(0),
            SweepConfig::default().with_edges_per_node(0),
            SweepConfig::default().with_realizations(0),
            SweepConfig::default().with_minority_fractions(vec![0.0]),
            SweepConfig::default().with_minority_fractions(vec![0.3, 1.0]),
            SweepConfig::default().with_homophily(vec![1.01]),
            SweepConfig::default().with_triadic_closure(vec![-0.1]),
            SweepConfig::default().with_homophily(Vec::new()),
            SweepConfig::default().with_mechanisms(vec![Lfm::Random], Vec::new()),
            SweepConfig::default().with_models(Vec::new(), true),
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(SweepError::InvalidConfig(_))),
                "{config:?}"
            );
        }
    }
}
