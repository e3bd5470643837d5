//! Composite inequality and segregation metrics for grouped graphs
//!
//! Given a graph and its minority / majority partition, [`compute`] extracts
//! the degree sequence of each group and produces one [`MetricsResult`]:
//!
//! - `gini`: Gini coefficient of the full degree sequence
//! - `ei` / `ei_indices`: edge-mixing indices, `ei` being the overall index
//! - `stoch_dom`: one-vs-rest dominance delta of the minority's degrees
//!
//! Undefined statistics stay NaN in the result.
//!
//! # Example
//!
//! ```rust
//! use patch_core::{Graph, Group, GroupPartition};
//!
//! // a star whose hub is the only minority node
//! let graph = Graph::from_edges(
//!     vec![Group::Minority, Group::Majority, Group::Majority, Group::Majority],
//!     [(0, 1), (0, 2), (0, 3)],
//! )
//! .unwrap();
//! let partition = GroupPartition::from_graph(&graph);
//!
//! let metrics = patch_metrics::compute(&graph, &partition).unwrap();
//! assert_eq!(metrics.ei, 1.0);
//! assert_eq!(metrics.stoch_dom, 1.0);
//! ```

use patch_core::{GroupGraph, GroupPartition, Result};
use patch_effect::GroupDominance;
use patch_mixing::EdgeCounts;
use serde::Serialize;
use tracing::debug;

pub use patch_mixing::EiIndices;

/// Metrics of one graph snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsResult {
    /// Gini coefficient of all degrees
    pub gini: f64,
    /// Overall EI index (equal to `ei_indices.overall`)
    pub ei: f64,
    /// Minority, majority and overall EI indices
    pub ei_indices: EiIndices,
    /// Stochastic dominance of the minority's degrees over the majority's
    pub stoch_dom: f64,
}

/// Degrees of minority and majority nodes, in node order
pub fn degree_samples<G: GroupGraph>(
    graph: &G,
    partition: &GroupPartition,
) -> (Vec<usize>, Vec<usize>) {
    let mut minority = Vec::with_capacity(partition.minority_count());
    let mut majority = Vec::with_capacity(partition.majority_count());
    for (node, degree) in graph.degrees() {
        if partition.is_minority(node) {
            minority.push(degree);
        } else {
            majority.push(degree);
        }
    }
    (minority, majority)
}

/// Gini coefficient of the degree sequence
pub fn compute_gini<G: GroupGraph>(graph: &G) -> f64 {
    let degrees: Vec<usize> = graph.degrees().map(|(_, degree)| degree).collect();
    patch_inequality::gini(&degrees)
}

/// Stochastic dominance of the minority group's degrees
///
/// Values close to 1 indicate that minority nodes have higher degrees than
/// majority nodes, values close to -1 the opposite.
pub fn compute_stoch_dom<G: GroupGraph>(graph: &G, partition: &GroupPartition) -> Result<f64> {
    let (minority, majority) = degree_samples(graph, partition);
    let deltas = GroupDominance::new().one_vs_rest(&[minority, majority])?;
    Ok(deltas[0])
}

/// EI indices of the graph's edges under the partition
pub fn compute_ei<G: GroupGraph>(graph: &G, partition: &GroupPartition) -> EiIndices {
    EdgeCounts::from_graph(graph, partition).ei_indices()
}

/// All metrics of one graph snapshot
pub fn compute<G: GroupGraph>(graph: &G, partition: &GroupPartition) -> Result<MetricsResult> {
    let ei_indices = compute_ei(graph, partition);
    let result = MetricsResult {
        gini: compute_gini(graph),
        ei: ei_indices.overall,
        ei_indices,
        stoch_dom: compute_stoch_dom(graph, partition)?,
    };
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        minority = partition.minority_count(),
        gini = result.gini,
        ei = result.ei,
        stoch_dom = result.stoch_dom,
        "computed graph metrics"
    );
    Ok(result)
}

/// All metrics, with the partition taken from the graph's group labels
pub fn compute_from_labels<G: GroupGraph>(graph: &G) -> Result<MetricsResult> {
    compute(graph, &GroupPartition::from_graph(graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use patch_core::{Graph, Group};

    fn bridged_triangles() -> Graph {
        Graph::from_edges(
            vec![
                Group::Minority,
                Group::Minority,
                Group::Minority,
                Group::Majority,
                Group::Majority,
                Group::Majority,
            ],
            [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)],
        )
        .unwrap()
    }

    #[test]
    fn test_degree_samples() {
        let graph = bridged_triangles();
        let partition = GroupPartition::from_graph(&graph);
        let (minority, majority) = degree_samples(&graph, &partition);
        assert_eq!(minority, vec![2, 2, 3]);
        assert_eq!(majority, vec![3, 2, 2]);
    }

    #[test]
    fn test_symmetric_graph() {
        let graph = bridged_triangles();
        let metrics = compute_from_labels(&graph).unwrap();

        // identical degree multisets on both sides
        assert_abs_diff_eq!(metrics.stoch_dom, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(metrics.ei, -5.0 / 7.0, epsilon = 1e-12);
        assert_eq!(metrics.ei, metrics.ei_indices.overall);
        // degrees [2,2,2,2,3,3]
        assert_abs_diff_eq!(metrics.gini, 2.0 / 21.0, epsilon = 1e-12);
    }

    #[test]
    fn test_edgeless_graph_is_undefined() {
        let graph = Graph::new(vec![Group::Minority, Group::Majority]);
        let metrics = compute_from_labels(&graph).unwrap();

        assert!(metrics.gini.is_nan());
        assert!(metrics.ei.is_nan());
        // both degree samples are [0]: a tie, not undefined
        assert_abs_diff_eq!(metrics.stoch_dom, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_minority_is_undefined() {
        let graph = Graph::from_edges(vec![Group::Majority; 3], [(0, 1), (1, 2)]).unwrap();
        let metrics = compute_from_labels(&graph).unwrap();

        assert!(metrics.stoch_dom.is_nan());
        assert_eq!(metrics.ei, -1.0);
    }

    #[test]
    fn test_explicit_partition_overrides_labels() {
        let graph = bridged_triangles();
        let partition = GroupPartition::from_minority([2, 3], graph.node_count()).unwrap();
        let metrics = compute(&graph, &partition).unwrap();

        // the two bridge endpoints have degree 3, everyone else degree 2
        assert_abs_diff_eq!(metrics.stoch_dom, 1.0, epsilon = 1e-12);
    }
}
