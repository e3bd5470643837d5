//! Node-link JSON serialisation of generated graphs
//!
//! The layout is the one graph libraries use for node-link data: a
//! `graph` attribute map, a `nodes` list and a `links` list. All values are
//! plain JSON numbers and strings.

use crate::error::Result;
use crate::grid::ParameterPoint;
use crate::mechanism::Lfm;
use patch_core::{Graph, GroupGraph, NodeId, MAJORITY_VALUE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkData {
    pub directed: bool,
    pub multigraph: bool,
    pub graph: GraphAttributes,
    pub nodes: Vec<NodeEntry>,
    pub links: Vec<LinkEntry>,
}

/// Parameters the graph was generated with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphAttributes {
    #[serde(rename = "N")]
    pub node_count: usize,
    #[serde(rename = "m")]
    pub edges_per_node: usize,
    #[serde(rename = "f")]
    pub minority_fraction: f64,
    #[serde(rename = "h")]
    pub homophily: f64,
    #[serde(rename = "tc")]
    pub triadic_closure: f64,
    pub lfm_l: Lfm,
    pub lfm_g: Lfm,
    pub realization: usize,
}

impl From<&ParameterPoint> for GraphAttributes {
    fn from(point: &ParameterPoint) -> Self {
        Self {
            node_count: point.node_count,
            edges_per_node: point.edges_per_node,
            minority_fraction: point.minority_fraction,
            homophily: point.homophily,
            triadic_closure: point.triadic_closure,
            lfm_l: point.lfm_local,
            lfm_g: point.lfm_global,
            realization: point.realization,
        }
    }
}

/// A node and its class label (`m`: 1 minority, 0 majority)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub id: NodeId,
    pub m: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub source: NodeId,
    pub target: NodeId,
}

impl NodeLinkData {
    pub fn new(graph: &Graph, point: &ParameterPoint) -> Self {
        let nodes = graph
            .nodes()
            .map(|id| NodeEntry {
                id,
                m: graph
                    .group(id)
                    .map_or(MAJORITY_VALUE, |group| group.label()),
            })
            .collect();
        let links = graph
            .edges()
            .map(|(source, target)| LinkEntry { source, target })
            .collect();
        Self {
            directed: false,
            multigraph: false,
            graph: GraphAttributes::from(point),
            nodes,
            links,
        }
    }
}

/// Serialise a graph and the point it was generated for
pub fn node_link_json(graph: &Graph, point: &ParameterPoint) -> Result<String> {
    Ok(serde_json::to_string(&NodeLinkData::new(graph, point))?)
}
