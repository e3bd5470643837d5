//! Parameter sweeps over generated grouped networks
//!
//! A [`Sweep`] enumerates a grid of generator parameters and link formation
//! mechanisms, generates one graph per point on a pool of worker threads,
//! computes its inequality and segregation metrics, and writes one CSV row
//! per point (plus, optionally, one node-link JSON file per graph).
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use patch_models::PatchGenerator;
//! use patch_sweep::{Lfm, Sweep, SweepConfig};
//!
//! let config = SweepConfig::default()
//!     .with_homophily(vec![0.2, 0.8])
//!     .with_triadic_closure(vec![0.0])
//!     .with_mechanisms(vec![Lfm::Random], vec![Lfm::Random])
//!     .with_realizations(1)
//!     .with_workers(2)
//!     .with_results_path("results.csv");
//!
//! let summary = Sweep::new(config, Arc::new(PatchGenerator::new())).run()?;
//! assert_eq!(summary.written, 2);
//! # Ok::<(), patch_sweep::SweepError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod json;
pub mod logging;
pub mod mechanism;
pub mod naming;
pub mod orchestrator;
pub mod sink;
pub mod task;
pub mod transform;
mod worker;

pub use config::{MechanismAxis, RowLayout, SweepConfig};
pub use error::{Result, SweepError};
pub use grid::{Grid, ParameterPoint};
pub use mechanism::{Lfm, MechanismTable};
pub use orchestrator::{Sweep, SweepState, SweepSummary};
pub use sink::{CsvSink, GraphDump, ResultSink};
pub use task::{ResultEnvelope, StatsRecord, Task, TaskMessage};
pub use transform::{transform, transform_file, TransformSummary};
