//! Inequality and segregation statistics for generated social networks
//!
//! Umbrella crate re-exporting the workspace members:
//!
//! - [`patch_core`]: graph, group and error types, the generator interface
//! - [`patch_effect`]: A12 and stochastic dominance effect sizes
//! - [`patch_inequality`]: Gini coefficient and empirical CDF
//! - [`patch_mixing`]: EI edge-mixing indices
//! - [`patch_metrics`]: the composite per-graph metrics
//! - [`patch_models`]: reference ERPATCH / TCH / PATCH generators
//! - [`patch_sweep`]: parallel parameter sweeps with CSV aggregation
//!
//! # Example
//!
//! ```rust
//! use patch_stats::patch_core::{GraphGenerator, ModelName, ModelParams};
//! use patch_stats::patch_models::PatchGenerator;
//!
//! let params = ModelParams::symmetric(300, 2, 0.3, 0.8, 0.5, true).with_seed(1);
//! let graph = PatchGenerator::new().generate(ModelName::Tch, &params).unwrap();
//! let metrics = patch_stats::patch_metrics::compute_from_labels(&graph).unwrap();
//! assert!(metrics.ei < 0.0);
//! ```

pub use patch_core;
pub use patch_effect;
pub use patch_inequality;
pub use patch_metrics;
pub use patch_mixing;
pub use patch_models;
pub use patch_sweep;

pub use patch_core::{Error, Graph, Group, GroupGraph, GroupPartition, Result};
pub use patch_metrics::{compute, MetricsResult};
