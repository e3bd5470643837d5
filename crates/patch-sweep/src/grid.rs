//! Parameter grid enumeration

use crate::config::{MechanismAxis, SweepConfig};
use crate::error::Result;
use crate::mechanism::{Lfm, MechanismTable};
use patch_core::{ModelName, ModelParams};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// One configuration of the sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterPoint {
    pub node_count: usize,
    pub edges_per_node: usize,
    pub minority_fraction: f64,
    pub homophily: f64,
    pub triadic_closure: f64,
    pub lfm_global: Lfm,
    pub lfm_local: Lfm,
    pub realization: usize,
}

impl ParameterPoint {
    /// Generator model and closure uniformity of this point
    pub fn model(&self, table: &MechanismTable) -> Result<(bool, ModelName)> {
        table.to_model(self.lfm_local, self.lfm_global)
    }

    /// Generator parameters with symmetric homophily
    pub fn model_params(&self, tc_uniform: bool) -> ModelParams {
        ModelParams::symmetric(
            self.node_count,
            self.edges_per_node,
            self.minority_fraction,
            self.homophily,
            self.triadic_closure,
            tc_uniform,
        )
    }
}

impl fmt::Display for ParameterPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "N={} m={} f={} h={} tc={} lfm_g={} lfm_l={} r={}",
            self.node_count,
            self.edges_per_node,
            self.minority_fraction,
            self.homophily,
            self.triadic_closure,
            self.lfm_global,
            self.lfm_local,
            self.realization
        )
    }
}

/// Valid points in dispatch order, plus the number of skipped combinations
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub points: Vec<ParameterPoint>,
    pub skipped: usize,
}

impl Grid {
    /// Enumerate the Cartesian product of the configured axes
    ///
    /// Mechanism pairs are nested as `f, h, tc, lfm_global, lfm_local, r`;
    /// model names as `f, h, tc, tcu, r, model`. Combinations the table
    /// cannot translate are counted in `skipped` and never dispatched.
    pub fn enumerate(config: &SweepConfig, table: &MechanismTable) -> Self {
        let mut grid = Self {
            points: Vec::new(),
            skipped: 0,
        };
        for &f in &config.minority_fractions {
            for &h in &config.homophily {
                for &tc in &config.triadic_closure {
                    let point = |lfm_global, lfm_local, realization| ParameterPoint {
                        node_count: config.node_count,
                        edges_per_node: config.edges_per_node,
                        minority_fraction: f,
                        homophily: h,
                        triadic_closure: tc,
                        lfm_global,
                        lfm_local,
                        realization,
                    };
                    match &config.mechanisms {
                        MechanismAxis::Mechanisms { global, local } => {
                            for &lfm_global in global {
                                for &lfm_local in local {
                                    for r in 0..config.realizations {
                                        if MechanismTable::is_valid(lfm_local, lfm_global)
                                            && table.model_of(lfm_global).is_ok()
                                        {
                                            grid.points.push(point(lfm_global, lfm_local, r));
                                        } else {
                                            let (g, l) = (lfm_global.as_str(), lfm_local.as_str());
                                            grid.skip(f, h, tc, g, l, r);
                                        }
                                    }
                                }
                            }
                        }
                        MechanismAxis::Models {
                            models,
                            include_tcu,
                        } => {
                            let uniformity: &[bool] = if *include_tcu {
                                &[false, true]
                            } else {
                                &[false]
                            };
                            for &tcu in uniformity {
                                for r in 0..config.realizations {
                                    for &model in models {
                                        match table.to_mechanisms(tcu, model) {
                                            Ok((lfm_global, lfm_local)) => {
                                                grid.points.push(point(lfm_global, lfm_local, r))
                                            }
                                            Err(_) => {
                                                let local = if tcu { "random" } else { "-" };
                                                grid.skip(f, h, tc, model.as_str(), local, r)
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        grid
    }

    fn skip(&mut self, f: f64, h: f64, tc: f64, global: &str, local: &str, r: usize) {
        self.skipped += 1;
        debug!(
            f,
            h,
            tc,
            global,
            local,
            r,
            skipped = self.skipped,
            "skipping invalid mechanism combination"
        );
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SweepConfig {
        SweepConfig::default()
            .with_minority_fractions(vec![0.3])
            .with_homophily(vec![0.2, 0.8])
            .with_triadic_closure(vec![0.0, 0.5])
            .with_realizations(3)
    }

    #[test]
    fn test_full_mechanism_grid() {
        let table = MechanismTable::default();
        let grid = Grid::enumerate(&small_config(), &table);

        // 5 of the 9 (global, local) pairs are valid
        assert_eq!(grid.len(), 2 * 2 * 5 * 3);
        assert_eq!(grid.skipped, 2 * 2 * 4 * 3);
        for point in &grid.points {
            assert!(MechanismTable::is_valid(point.lfm_local, point.lfm_global));
        }
    }

    #[test]
    fn test_enumeration_order() {
        let table = MechanismTable::default();
        let config = small_config()
            .with_homophily(vec![0.2])
            .with_triadic_closure(vec![0.0])
            .with_realizations(2)
            .with_mechanisms(vec![Lfm::Homophily], vec![Lfm::Random, Lfm::Homophily]);
        let grid = Grid::enumerate(&config, &table);

        let order: Vec<_> = grid
            .points
            .iter()
            .map(|p| (p.lfm_local, p.realization))
            .collect();
        assert_eq!(
            order,
            vec![
                (Lfm::Random, 0),
                (Lfm::Random, 1),
                (Lfm::Homophily, 0),
                (Lfm::Homophily, 1)
            ]
        );
    }

    #[test]
    fn test_model_grid() {
        let table = MechanismTable::default();
        let without = Grid::enumerate(&small_config().with_models(ModelName::ALL, false), &table);
        // ERPATCH without uniform closure is skipped
        assert_eq!(without.len(), 2 * 2 * 2 * 3);
        assert_eq!(without.skipped, 2 * 2 * 3);

        let with = Grid::enumerate(&small_config().with_models(ModelName::ALL, true), &table);
        assert_eq!(with.len(), 2 * 2 * 5 * 3);
        assert_eq!(with.skipped, without.skipped);
    }

    #[test]
    fn test_point_parameters() {
        let table = MechanismTable::default();
        let grid = Grid::enumerate(
            &small_config().with_mechanisms(vec![Lfm::Pah], vec![Lfm::Random]),
            &table,
        );
        let point = grid.points[0];
        assert_eq!(point.model(&table).unwrap(), (true, ModelName::Patch));

        let params = point.model_params(true);
        assert_eq!(params.node_count, 5000);
        assert_eq!(params.h_mm, point.homophily);
        assert_eq!(params.h_maj, point.homophily);
        assert!(params.tc_uniform);
    }
}
