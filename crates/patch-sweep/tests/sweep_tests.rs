//! End-to-end sweeps through the worker pool and the file sinks

use std::fs;
use std::path::Path;
use std::sync::Arc;

use patch_core::{Graph, GraphGenerator, ModelName, ModelParams};
use patch_models::PatchGenerator;
use patch_sweep::json::NodeLinkData;
use patch_sweep::sink::{MechanismRow, ModelRow};
use patch_sweep::{
    transform_file, Lfm, MechanismTable, RowLayout, Sweep, SweepConfig, SweepError,
};

fn read_rows<T: serde::de::DeserializeOwned>(path: &Path) -> Vec<T> {
    csv::Reader::from_path(path)
        .unwrap()
        .deserialize()
        .collect::<csv::Result<Vec<T>>>()
        .unwrap()
}

fn small_config(dir: &Path) -> SweepConfig {
    SweepConfig::default()
        .with_node_count(200)
        .with_minority_fractions(vec![0.3])
        .with_homophily(vec![0.2, 0.8])
        .with_triadic_closure(vec![0.0, 0.5])
        .with_realizations(2)
        .with_workers(3)
        .with_results_path(dir.join("results").join("stats.csv"))
}

/// Fails for one homophily value
struct FailingGenerator;

impl GraphGenerator for FailingGenerator {
    fn generate(&self, model: ModelName, params: &ModelParams) -> patch_core::Result<Graph> {
        if params.h_mm > 0.5 {
            return Err(patch_core::Error::Generation("generator crashed".to_string()));
        }
        PatchGenerator::new().generate(model, params)
    }
}

/// Panics on every call
struct PanickingGenerator;

impl GraphGenerator for PanickingGenerator {
    fn generate(&self, _model: ModelName, _params: &ModelParams) -> patch_core::Result<Graph> {
        panic!("generator exploded")
    }
}

#[test]
fn test_reference_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let config = SweepConfig::default()
        .with_node_count(5000)
        .with_edges_per_node(2)
        .with_minority_fractions(vec![0.3])
        .with_homophily(vec![0.2, 0.8])
        .with_triadic_closure(vec![0.0])
        .with_mechanisms(vec![Lfm::Random], vec![Lfm::Random])
        .with_realizations(1)
        .with_workers(2)
        .with_results_path(dir.path().join("stats.csv"));

    let summary = Sweep::new(config, Arc::new(PatchGenerator::new()))
        .run()
        .unwrap();

    assert_eq!(summary.dispatched, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.written, 2);
    assert_eq!(summary.pending_tasks, 0);

    let rows: Vec<MechanismRow> = read_rows(&dir.path().join("stats.csv"));
    assert_eq!(rows.len(), 2);
    let mut homophily: Vec<f64> = rows.iter().map(|row| row.h).collect();
    homophily.sort_by(f64::total_cmp);
    assert_eq!(homophily, vec![0.2, 0.8]);
    for row in &rows {
        assert_eq!((row.lfm_local, row.lfm_global), (Lfm::Random, Lfm::Random));
        assert!(row.gini > 0.0 && row.gini < 1.0);
    }
}

#[test]
fn test_points_round_trip_bit_for_bit() {
    let dir = tempfile::tempdir().unwrap();
    // values without a short decimal form
    let config = small_config(dir.path())
        .with_homophily(vec![0.1 + 0.2, 1.0 / 3.0])
        .with_triadic_closure(vec![std::f64::consts::FRAC_1_SQRT_2]);
    let sweep = Sweep::new(config, Arc::new(PatchGenerator::new()));
    let grid = sweep.grid();
    sweep.run().unwrap();

    let rows: Vec<MechanismRow> = read_rows(&sweep.config().results_path);
    assert_eq!(rows.len(), grid.len());
    for point in &grid.points {
        let matches = rows
            .iter()
            .filter(|row| {
                row.f.to_bits() == point.minority_fraction.to_bits()
                    && row.h.to_bits() == point.homophily.to_bits()
                    && row.tc.to_bits() == point.triadic_closure.to_bits()
                    && row.lfm_global == point.lfm_global
                    && row.lfm_local == point.lfm_local
                    && row.r == point.realization
            })
            .count();
        assert_eq!(matches, 1, "{point}");
    }
}

#[test]
fn test_graph_dumps() {
    let dir = tempfile::tempdir().unwrap();
    let graphs = dir.path().join("graphs");
    let config = small_config(dir.path())
        .with_homophily(vec![0.5])
        .with_triadic_closure(vec![1.0])
        .with_mechanisms(vec![Lfm::Pah], vec![Lfm::Random, Lfm::Pah])
        .with_realizations(1)
        .with_graphs_dir(&graphs);

    let summary = Sweep::new(config, Arc::new(PatchGenerator::new()))
        .run()
        .unwrap();
    assert_eq!(summary.graphs_written, 2);

    let name = "N-200_m-2_f-0.3_h-0.5_tc-1.0_lfm-l-random_lfm-g-pah_r-0.json";
    let path = graphs.join(name);
    let text = fs::read_to_string(path).unwrap();
    let data: NodeLinkData = serde_json::from_str(&text).unwrap();
    assert_eq!(data.nodes.len(), 200);
    assert_eq!(data.graph.lfm_g, Lfm::Pah);
    assert_eq!(data.graph.triadic_closure, 1.0);
    assert!(!data.directed);
    assert_eq!(fs::read_dir(&graphs).unwrap().count(), 2);
}

#[test]
fn test_seeded_sweeps_are_reproducible() {
    let run = |name: &str| {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(dir.path())
            .with_workers(1)
            .with_seed(2024)
            .with_results_path(dir.path().join(name));
        Sweep::new(config, Arc::new(PatchGenerator::new()))
            .run()
            .unwrap();
        fs::read_to_string(dir.path().join(name)).unwrap()
    };
    assert_eq!(run("a.csv"), run("b.csv"));
}

#[test]
fn test_model_layout_and_transform() {
    let dir = tempfile::tempdir().unwrap();
    let results = dir.path().join("models.csv");
    let config = small_config(dir.path())
        .with_models(ModelName::ALL, true)
        .with_layout(RowLayout::Models)
        .with_results_path(&results);

    let summary = Sweep::new(config, Arc::new(PatchGenerator::new()))
        .run()
        .unwrap();
    // ERPATCH only runs with uniform closure
    assert_eq!(summary.written, 2 * 2 * 2 * 5);
    assert_eq!(summary.skipped, 2 * 2 * 2);

    let rows: Vec<ModelRow> = read_rows(&results);
    assert!(rows
        .iter()
        .all(|row| row.model_name != ModelName::ErPatch || row.tcu));

    let output = dir.path().join("vis.csv");
    let transformed = transform_file(&results, &output, &MechanismTable::default()).unwrap();
    assert_eq!(transformed.read, rows.len());
    assert_eq!(transformed.written, rows.len());
    assert_eq!(transformed.dropped, 0);
}

#[test]
fn test_generator_error_fails_the_sweep() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path());
    let results = config.results_path.clone();

    let err = Sweep::new(config, Arc::new(FailingGenerator))
        .run()
        .unwrap_err();
    match err {
        SweepError::WorkerFailed { point, message, .. } => {
            assert_eq!(point.homophily, 0.8);
            assert!(message.contains("generator crashed"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
    // the sink was opened before dispatch and holds at least the header
    assert!(fs::read_to_string(results).unwrap().starts_with("f,h,tc"));
}

#[test]
fn test_generator_panic_fails_the_sweep() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path()).with_workers(2);

    let err = Sweep::new(config, Arc::new(PanickingGenerator))
        .run()
        .unwrap_err();
    match err {
        SweepError::WorkerFailed { message, .. } => {
            assert!(message.contains("generator exploded"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_unwritable_results_path() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let config = small_config(dir.path()).with_results_path(blocker.join("stats.csv"));

    let err = Sweep::new(config, Arc::new(PatchGenerator::new()))
        .run()
        .unwrap_err();
    assert!(matches!(err, SweepError::Io { .. }), "{err:?}");
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path()).with_homophily(vec![1.5]);
    let err = Sweep::new(config, Arc::new(PatchGenerator::new()))
        .run()
        .unwrap_err();
    assert!(matches!(err, SweepError::InvalidConfig(_)));
}
