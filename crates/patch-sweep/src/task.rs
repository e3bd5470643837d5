//! Messages exchanged between the coordinator and the workers

use crate::grid::ParameterPoint;
use patch_core::ModelName;
use patch_metrics::MetricsResult;
use serde::Serialize;

/// One unit of work
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Task {
    /// Position in the sweep, 0-based
    pub index: usize,
    /// Number of dispatched tasks
    pub total: usize,
    pub point: ParameterPoint,
    /// Generator seed, `None` for entropy
    pub seed: Option<u64>,
}

/// Entry of the task queue
#[derive(Debug, Clone, PartialEq)]
pub enum TaskMessage {
    Run(Task),
    /// One per worker; the worker drawing it exits
    Stop,
}

/// Statistics of one completed point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsRecord {
    pub point: ParameterPoint,
    pub tc_uniform: bool,
    pub model: ModelName,
    pub metrics: MetricsResult,
}

/// What a worker reports for each task it draws
#[derive(Debug, Clone, PartialEq)]
pub enum ResultEnvelope {
    Completed {
        record: StatsRecord,
        /// Node-link JSON of the graph when dumps are enabled
        graph_json: Option<String>,
    },
    Failed {
        index: usize,
        point: ParameterPoint,
        message: String,
    },
}
