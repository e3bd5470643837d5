//! Error type of the sweep
//!
//! Wraps the statistics error and adds the I/O and worker-pool failure
//! kinds. Every variant is fatal for the run.

use crate::grid::ParameterPoint;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    /// Generation or metrics error raised in the coordinator
    #[error(transparent)]
    Core(#[from] patch_core::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system error on a known path
    #[error("IO error on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A task failed inside a worker
    #[error("Task {index} ({point}) failed: {message}")]
    WorkerFailed {
        index: usize,
        point: ParameterPoint,
        message: String,
    },

    /// A worker thread died outside the per-task guard
    #[error("Worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    /// All workers went away before every result arrived
    #[error("Results channel closed after {received} of {expected} results")]
    ResultsDisconnected { received: usize, expected: usize },

    #[error("Failed to spawn worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Task queue closed while dispatching")]
    TaskQueueClosed,

    /// Unknown mechanism name or invalid local/global combination
    #[error("Invalid mechanism: {0}")]
    InvalidMechanism(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SweepError>;

impl SweepError {
    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
