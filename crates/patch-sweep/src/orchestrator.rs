//! Sweep coordinator
//!
//! Enumerates the grid, fills the task queue upfront (one `Stop` per worker
//! after the tasks), starts the workers and drains the results queue into
//! the sink until every dispatched task is accounted for.
//!
//! Each task is attempted once. The first failure stops collection: the
//! results receiver is dropped, the workers are joined and the failure is
//! returned.

use crate::config::SweepConfig;
use crate::error::{Result, SweepError};
use crate::grid::Grid;
use crate::mechanism::MechanismTable;
use crate::sink::{CsvSink, GraphDump, ResultSink};
use crate::task::{ResultEnvelope, Task, TaskMessage};
use crate::worker::{self, WorkerContext};
use crossbeam_channel::Receiver;
use patch_core::GraphGenerator;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, error, info, instrument};

/// Lifecycle of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepState {
    Enumerating,
    Dispatched { tasks: usize },
    Collecting,
    Drained,
    Joined,
}

impl fmt::Display for SweepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enumerating => f.write_str("enumerating"),
            Self::Dispatched { tasks } => write!(f, "dispatched ({tasks} tasks)"),
            Self::Collecting => f.write_str("collecting"),
            Self::Drained => f.write_str("drained"),
            Self::Joined => f.write_str("joined"),
        }
    }
}

/// Counts of a finished sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    /// Tasks put on the queue
    pub dispatched: usize,
    /// Invalid combinations never dispatched
    pub skipped: usize,
    /// Rows written to the sink
    pub written: usize,
    /// Graph files written
    pub graphs_written: usize,
    /// Queue entries left after all workers exited
    pub pending_tasks: usize,
}

/// A configured sweep, ready to run
pub struct Sweep {
    config: SweepConfig,
    table: Arc<MechanismTable>,
    generator: Arc<dyn GraphGenerator>,
}

impl Sweep {
    pub fn new(config: SweepConfig, generator: Arc<dyn GraphGenerator>) -> Self {
        Self {
            config,
            table: Arc::new(MechanismTable::default()),
            generator,
        }
    }

    /// Replace the mechanism translation table
    pub fn with_table(mut self, table: MechanismTable) -> Self {
        self.table = Arc::new(table);
        self
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn table(&self) -> &MechanismTable {
        &self.table
    }

    /// Valid points of the configured grid, in dispatch order
    pub fn grid(&self) -> Grid {
        Grid::enumerate(&self.config, &self.table)
    }

    /// Run the sweep into the configured results file and graph directory
    ///
    /// Output files are opened before any task is dispatched, so an
    /// unwritable destination fails the run immediately.
    #[instrument(
        skip(self),
        fields(
            results = %self.config.results_path.display(),
            workers = self.config.resolved_workers()
        )
    )]
    pub fn run(&self) -> Result<SweepSummary> {
        self.config.validate()?;
        let mut sink = CsvSink::create(&self.config.results_path, self.config.layout)?;
        let dump = self
            .config
            .graphs_dir
            .as_ref()
            .map(GraphDump::create)
            .transpose()?;
        info!("writing results");
        self.run_with_sink(&mut sink, dump.as_ref())
    }

    /// Run the sweep into an arbitrary sink
    pub fn run_with_sink<S: ResultSink>(
        &self,
        sink: &mut S,
        dump: Option<&GraphDump>,
    ) -> Result<SweepSummary> {
        self.config.validate()?;
        let mut state = enter(SweepState::Enumerating);

        let grid = self.grid();
        let total = grid.len();
        let workers = self.config.resolved_workers();
        let mut summary = SweepSummary {
            dispatched: total,
            skipped: grid.skipped,
            ..SweepSummary::default()
        };

        let (task_tx, task_rx) = crossbeam_channel::unbounded();
        for (index, point) in grid.points.into_iter().enumerate() {
            let seed = self.config.seed.map(|base| base.wrapping_add(index as u64));
            let task = Task {
                index,
                total,
                point,
                seed,
            };
            task_tx
                .send(TaskMessage::Run(task))
                .map_err(|_| SweepError::TaskQueueClosed)?;
        }
        for _ in 0..workers {
            task_tx
                .send(TaskMessage::Stop)
                .map_err(|_| SweepError::TaskQueueClosed)?;
        }
        drop(task_tx);
        state = advance(state, SweepState::Dispatched { tasks: total });

        let context = WorkerContext {
            generator: Arc::clone(&self.generator),
            table: Arc::clone(&self.table),
            dump_graphs: dump.is_some(),
        };
        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        let spawned = worker::spawn_workers(workers, &task_rx, &result_tx, &context);
        drop(result_tx);
        let handles = match spawned {
            Ok(handles) => handles,
            Err((handles, err)) => {
                error!(error = %err, "failed to start workers");
                drop(result_rx);
                // already started workers drain the queue; their sends fail harmlessly
                let _ = join_workers(handles);
                return Err(err);
            }
        };

        state = advance(state, SweepState::Collecting);
        let collected = collect(&result_rx, total, sink, dump, &mut summary);
        if collected.is_ok() {
            state = advance(state, SweepState::Drained);
        }

        // unblocks workers still computing after a failure
        drop(result_rx);
        let joined = join_workers(handles);
        summary.pending_tasks = task_rx.len();
        collected?;
        joined?;
        sink.flush()?;
        advance(state, SweepState::Joined);

        info!(
            dispatched = summary.dispatched,
            skipped = summary.skipped,
            written = summary.written,
            graphs = summary.graphs_written,
            "sweep complete"
        );
        Ok(summary)
    }
}

fn enter(state: SweepState) -> SweepState {
    debug!(%state, "sweep state");
    state
}

fn advance(from: SweepState, to: SweepState) -> SweepState {
    debug!(from = %from, to = %to, "sweep state");
    to
}

/// Drain `expected` envelopes into the sink
fn collect<S: ResultSink>(
    results: &Receiver<ResultEnvelope>,
    expected: usize,
    sink: &mut S,
    dump: Option<&GraphDump>,
    summary: &mut SweepSummary,
) -> Result<()> {
    let mut received = 0;
    while received < expected {
        let envelope = results
            .recv()
            .map_err(|_| SweepError::ResultsDisconnected { received, expected })?;
        received += 1;

        match envelope {
            ResultEnvelope::Completed { record, graph_json } => {
                if let (Some(dump), Some(json)) = (dump, graph_json.as_deref()) {
                    let path = dump.write(&record.point, json)?;
                    info!(path = %path.display(), "wrote graph");
                    summary.graphs_written += 1;
                }
                sink.write_record(&record)?;
                summary.written += 1;
            }
            ResultEnvelope::Failed {
                index,
                point,
                message,
            } => {
                error!(
                    task = index + 1,
                    %point,
                    %message,
                    "task failed, aborting sweep"
                );
                return Err(SweepError::WorkerFailed {
                    index,
                    point,
                    message,
                });
            }
        }
    }
    Ok(())
}

/// Join every worker, reporting the first that panicked
fn join_workers(handles: Vec<JoinHandle<()>>) -> Result<()> {
    let mut outcome = Ok(());
    for (worker, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() && outcome.is_ok() {
            outcome = Err(SweepError::WorkerPanicked { worker });
        }
    }
    debug!("workers joined");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanism::Lfm;
    use crate::task::StatsRecord;

    #[derive(Default)]
    struct MemorySink {
        records: Vec<StatsRecord>,
        flushed: bool,
    }

    impl ResultSink for MemorySink {
        fn write_record(&mut self, record: &StatsRecord) -> Result<()> {
            self.records.push(*record);
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushed = true;
            Ok(())
        }
    }

    fn small_config(workers: usize) -> SweepConfig {
        SweepConfig::default()
            .with_node_count(60)
            .with_minority_fractions(vec![0.3])
            .with_homophily(vec![0.2, 0.8])
            .with_triadic_closure(vec![0.0, 0.5])
            .with_realizations(2)
            .with_workers(workers)
            .with_seed(17)
    }

    #[test]
    fn test_state_display() {
        assert_eq!(
            SweepState::Dispatched { tasks: 3 }.to_string(),
            "dispatched (3 tasks)"
        );
        assert_eq!(SweepState::Joined.to_string(), "joined");
    }

    #[test]
    fn test_every_point_written_once() {
        let sweep = Sweep::new(
            small_config(3),
            Arc::new(patch_models::PatchGenerator::new()),
        );
        let expected = sweep.grid();
        let mut sink = MemorySink::default();
        let summary = sweep.run_with_sink(&mut sink, None).unwrap();

        assert_eq!(summary.dispatched, expected.len());
        assert_eq!(summary.written, expected.len());
        assert_eq!(summary.pending_tasks, 0);
        assert!(sink.flushed);
        for point in &expected.points {
            let hits = sink.records.iter().filter(|r| r.point == *point).count();
            assert_eq!(hits, 1, "{point}");
        }
    }

    #[test]
    fn test_collect_fails_when_results_close_early() {
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<ResultEnvelope>();
        drop(result_tx);
        let mut sink = MemorySink::default();
        let mut summary = SweepSummary::default();

        let err = collect(&result_rx, 3, &mut sink, None, &mut summary).unwrap_err();

        assert!(
            matches!(
                err,
                SweepError::ResultsDisconnected {
                    received: 0,
                    expected: 3,
                }
            ),
            "{err:?}"
        );
        assert_eq!(summary.written, 0);
    }

    #[test]
    fn test_collect_counts_results_before_disconnect() {
        let sweep = Sweep::new(
            small_config(1),
            Arc::new(patch_models::PatchGenerator::new()),
        );
        let point = sweep.grid().points[0];
        let (record, _) = worker::process(
            &Task {
                index: 0,
                total: 1,
                point,
                seed: Some(3),
            },
            &WorkerContext {
                generator: Arc::new(patch_models::PatchGenerator::new()),
                table: Arc::new(MechanismTable::default()),
                dump_graphs: false,
            },
        )
        .unwrap();

        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        result_tx
            .send(ResultEnvelope::Completed {
                record,
                graph_json: None,
            })
            .unwrap();
        drop(result_tx);
        let mut sink = MemorySink::default();
        let mut summary = SweepSummary::default();

        let err = collect(&result_rx, 2, &mut sink, None, &mut summary).unwrap_err();

        assert!(matches!(
            err,
            SweepError::ResultsDisconnected {
                received: 1,
                expected: 2,
            }
        ));
        assert_eq!(summary.written, 1);
        assert_eq!(sink.records.len(), 1);
    }

    #[test]
    fn test_empty_grid_completes() {
        // random global with a pah local is never valid
        let config = small_config(2).with_mechanisms(vec![Lfm::Random], vec![Lfm::Pah]);
        let sweep = Sweep::new(config, Arc::new(patch_models::PatchGenerator::new()));
        let mut sink = MemorySink::default();
        let summary = sweep.run_with_sink(&mut sink, None).unwrap();
        assert_eq!(summary.dispatched, 0);
        assert_eq!(summary.skipped, 8);
        assert!(sink.records.is_empty());
    }
}
