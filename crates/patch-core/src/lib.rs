//! Core types for network inequality and segregation statistics
//!
//! This crate provides the vocabulary shared by the statistics crates and
//! the parameter sweep:
//!
//! - [`Error`] / [`Result`]: one error type for every library crate
//! - [`Numeric`]: sample values of any primitive numeric type
//! - [`Group`] / [`GroupPartition`]: the minority / majority split
//! - [`GroupGraph`] / [`Graph`]: the read-only graph interface and an owned
//!   undirected graph implementing it
//! - [`GraphGenerator`]: the black-box graph generator interface
//!
//! # Example
//!
//! ```rust
//! use patch_core::{Graph, Group, GroupGraph, GroupPartition};
//!
//! let graph = Graph::from_edges(
//!     vec![Group::Minority, Group::Majority, Group::Majority],
//!     [(0, 1), (1, 2)],
//! )
//! .unwrap();
//!
//! let partition = GroupPartition::from_graph(&graph);
//! assert_eq!(partition.minority_count(), 1);
//! assert_eq!(graph.degree(1), Some(2));
//! ```

pub mod error;
pub mod graph;
pub mod group;
pub mod model;
pub mod numeric;

pub use error::{Error, Result};
pub use graph::{Graph, GroupGraph, NodeId};
pub use group::{Group, GroupPartition, CLASS_ATTRIBUTE, MAJORITY_VALUE, MINORITY_VALUE};
pub use model::{GraphGenerator, ModelName, ModelParams};
pub use numeric::{to_f64_vec, Numeric};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
