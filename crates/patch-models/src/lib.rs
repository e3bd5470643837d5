//! Reference growth models for grouped networks
//!
//! [`PatchGenerator`] implements [`patch_core::GraphGenerator`] for the three
//! models the sweep knows about:
//!
//! | Model   | Global mechanism                    |
//! |---------|-------------------------------------|
//! | ERPATCH | uniform                             |
//! | TCH     | homophily                           |
//! | PATCH   | homophily × preferential attachment |
//!
//! All three add links by triadic closure with probability `tc`.
//!
//! # Example
//!
//! ```rust
//! use patch_core::{GraphGenerator, GroupGraph, ModelName, ModelParams};
//! use patch_models::PatchGenerator;
//!
//! let params = ModelParams::symmetric(200, 2, 0.3, 0.8, 0.5, true).with_seed(42);
//! let graph = PatchGenerator::new().generate(ModelName::Patch, &params).unwrap();
//! assert_eq!(graph.node_count(), 200);
//! ```

mod attachment;
mod generator;

pub use attachment::{GlobalMechanism, EPSILON};
pub use generator::PatchGenerator;
