//! Read-only graph interface and a small owned undirected graph
//!
//! Statistics read graphs through [`GroupGraph`] only: node enumeration,
//! degree lookup, group labels, and edge enumeration. They never mutate it.

use crate::group::Group;
use crate::{Error, Result};

/// Node identifier; nodes of a graph are `0..node_count`
pub type NodeId = usize;

/// Undirected graph whose nodes carry a group label
pub trait GroupGraph {
    /// Number of nodes
    fn node_count(&self) -> usize;

    /// Number of undirected edges
    fn edge_count(&self) -> usize;

    /// Group label of a node, `None` for unknown ids
    fn group(&self, node: NodeId) -> Option<Group>;

    /// Degree of a node, `None` for unknown ids
    fn degree(&self, node: NodeId) -> Option<usize>;

    /// Every undirected edge exactly once
    fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_;

    /// Every node id
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        0..self.node_count()
    }

    /// `(node, degree)` pairs for every node
    fn degrees(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        self.nodes()
            .map(move |node| (node, self.degree(node).unwrap_or(0)))
    }
}

/// Owned simple undirected graph (no self loops, no parallel edges)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    groups: Vec<Group>,
    adjacency: Vec<Vec<NodeId>>,
    edges: Vec<(NodeId, NodeId)>,
}

impl Graph {
    /// Create an edgeless graph with one node per label
    pub fn new(groups: Vec<Group>) -> Self {
        let adjacency = vec![Vec::new(); groups.len()];
        Self {
            groups,
            adjacency,
            edges: Vec::new(),
        }
    }

    /// Create a graph from labels and an edge list
    pub fn from_edges<I>(groups: Vec<Group>, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut graph = Self::new(groups);
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Append a node and return its id
    pub fn add_node(&mut self, group: Group) -> NodeId {
        self.groups.push(group);
        self.adjacency.push(Vec::new());
        self.groups.len() - 1
    }

    /// Insert an undirected edge
    ///
    /// Returns `false` when the edge already exists. Self loops and unknown
    /// nodes are rejected.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<bool> {
        let n = self.groups.len();
        if u >= n {
            return Err(Error::unknown_node(u, n));
        }
        if v >= n {
            return Err(Error::unknown_node(v, n));
        }
        if u == v {
            return Err(Error::InvalidInput(format!("Self loop on node {u}")));
        }
        if self.has_edge(u, v) {
            return Ok(false);
        }
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
        self.edges.push((u, v));
        Ok(true)
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        match (self.adjacency.get(u), self.adjacency.get(v)) {
            (Some(a), Some(b)) => {
                // scan the shorter list
                if a.len() <= b.len() {
                    a.contains(&v)
                } else {
                    b.contains(&u)
                }
            }
            _ => false,
        }
    }

    /// Neighbours of a node in insertion order
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Edge list in insertion order
    pub fn edge_list(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }
}

impl GroupGraph for Graph {
    fn node_count(&self) -> usize {
        self.groups.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn group(&self, node: NodeId) -> Option<Group> {
        self.groups.get(node).copied()
    }

    fn degree(&self, node: NodeId) -> Option<usize> {
        self.adjacency.get(node).map(Vec::len)
    }

    fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.edges.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> Graph {
        Graph::from_edges(
            vec![Group::Minority, Group::Majority, Group::Majority],
            [(0, 1), (1, 2)],
        )
        .unwrap()
    }

    #[test]
    fn test_degrees_and_edges() {
        let graph = path_graph();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        let degrees: Vec<_> = graph.degrees().collect();
        assert_eq!(degrees, vec![(0, 1), (1, 2), (2, 1)]);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_duplicate_edges_are_ignored() {
        let mut graph = path_graph();
        assert!(!graph.add_edge(1, 0).unwrap());
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge(2, 1));
        assert!(!graph.has_edge(0, 2));
    }

    #[test]
    fn test_invalid_edges_are_rejected() {
        let mut graph = path_graph();
        assert!(graph.add_edge(0, 0).is_err());
        assert!(graph.add_edge(0, 9).is_err());
    }

    #[test]
    fn test_add_node() {
        let mut graph = path_graph();
        let id = graph.add_node(Group::Minority);
        assert_eq!(id, 3);
        assert_eq!(graph.degree(id), Some(0));
        assert_eq!(graph.group(id), Some(Group::Minority));
        assert_eq!(graph.degree(10), None);
    }
}
