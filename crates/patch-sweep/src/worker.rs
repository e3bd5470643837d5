//! Worker threads
//!
//! Each worker drains the shared task queue until it draws a `Stop` or finds
//! the queue empty, and reports every task it drew as exactly one
//! [`ResultEnvelope`]. Errors and panics inside a task become `Failed`
//! envelopes.

use crate::error::{Result, SweepError};
use crate::json;
use crate::mechanism::MechanismTable;
use crate::task::{ResultEnvelope, StatsRecord, Task, TaskMessage};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use patch_core::{GraphGenerator, GroupPartition};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

/// Immutable state shared by all workers
#[derive(Clone)]
pub(crate) struct WorkerContext {
    pub(crate) generator: Arc<dyn GraphGenerator>,
    pub(crate) table: Arc<MechanismTable>,
    pub(crate) dump_graphs: bool,
}

/// Start one named thread per worker
///
/// If a spawn fails, the threads already started are returned alongside the
/// error so the caller can join them.
pub(crate) fn spawn_workers(
    count: usize,
    tasks: &Receiver<TaskMessage>,
    results: &Sender<ResultEnvelope>,
    context: &WorkerContext,
) -> std::result::Result<Vec<JoinHandle<()>>, (Vec<JoinHandle<()>>, SweepError)> {
    let mut handles = Vec::with_capacity(count);
    for worker in 0..count {
        let tasks = tasks.clone();
        let results = results.clone();
        let context = context.clone();
        let spawned = thread::Builder::new()
            .name(format!("sweep-worker-{worker}"))
            .spawn(move || run_worker(worker, tasks, results, context));
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(source) => return Err((handles, SweepError::Spawn { worker, source })),
        }
    }
    Ok(handles)
}

fn run_worker(
    worker: usize,
    tasks: Receiver<TaskMessage>,
    results: Sender<ResultEnvelope>,
    context: WorkerContext,
) {
    loop {
        let task = match tasks.try_recv() {
            Ok(TaskMessage::Run(task)) => task,
            Ok(TaskMessage::Stop) => {
                debug!(worker, "stop signal received");
                return;
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {
                debug!(worker, "task queue exhausted");
                return;
            }
        };

        info!(
            worker,
            task = task.index + 1,
            total = task.total,
            point = %task.point,
            "working on task"
        );

        let envelope = match panic::catch_unwind(AssertUnwindSafe(|| process(&task, &context))) {
            Ok(Ok((record, graph_json))) => ResultEnvelope::Completed { record, graph_json },
            Ok(Err(err)) => ResultEnvelope::Failed {
                index: task.index,
                point: task.point,
                message: err.to_string(),
            },
            Err(payload) => ResultEnvelope::Failed {
                index: task.index,
                point: task.point,
                message: format!("panicked: {}", panic_message(payload.as_ref())),
            },
        };

        if results.send(envelope).is_err() {
            debug!(worker, "results receiver dropped, exiting");
            return;
        }
    }
}

/// Generate the graph of one task and compute its statistics
pub(crate) fn process(
    task: &Task,
    context: &WorkerContext,
) -> Result<(StatsRecord, Option<String>)> {
    let point = &task.point;
    let (tc_uniform, model) = point.model(&context.table)?;
    let mut params = point.model_params(tc_uniform);
    if let Some(seed) = task.seed {
        params = params.with_seed(seed);
    }

    let graph = context.generator.generate(model, &params)?;
    let partition = GroupPartition::from_graph(&graph);
    let metrics = patch_metrics::compute(&graph, &partition)?;

    let graph_json = if context.dump_graphs {
        Some(json::node_link_json(&graph, point)?)
    } else {
        None
    };

    let record = StatsRecord {
        point: *point,
        tc_uniform,
        model,
        metrics,
    };
    Ok((record, graph_json))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
