//! Command-line surface of the `patch-sweep` binary

use crate::config::{
    RowLayout, SweepConfig, DEFAULT_EDGES_PER_NODE, DEFAULT_HOMOPHILY, DEFAULT_MINORITY_FRACTIONS,
    DEFAULT_NODE_COUNT, DEFAULT_REALIZATIONS, DEFAULT_RESULTS_PATH, DEFAULT_TRIADIC_CLOSURE,
};
use crate::error::Result;
use crate::mechanism::{Lfm, MechanismTable};
use crate::orchestrator::{Sweep, SweepSummary};
use crate::transform::{self, TransformSummary, DEFAULT_INPUT, DEFAULT_OUTPUT};
use clap::{Args, Parser, Subcommand};
use patch_core::ModelName;
use patch_models::PatchGenerator;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "patch-sweep")]
#[command(about = "Generate grouped networks over a parameter grid and aggregate their statistics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a parameter sweep and write one CSV row per graph
    Run(RunArgs),

    /// Convert a `models` layout CSV into global/local mechanism rows
    Transform(TransformArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Results CSV
    #[arg(long = "path-results", visible_alias = "pr", default_value = DEFAULT_RESULTS_PATH)]
    pub path_results: PathBuf,

    /// Directory for node-link JSON dumps of every graph
    #[arg(long = "path-graphs", visible_alias = "pg")]
    pub path_graphs: Option<PathBuf>,

    /// Number of nodes
    #[arg(short = 'N', default_value_t = DEFAULT_NODE_COUNT)]
    pub node_count: usize,

    /// Edges per new node
    #[arg(short = 'm', default_value_t = DEFAULT_EDGES_PER_NODE)]
    pub edges_per_node: usize,

    /// Minority fractions
    #[arg(short = 'f', num_args = 1.., default_values_t = DEFAULT_MINORITY_FRACTIONS)]
    pub minority_fractions: Vec<f64>,

    /// Homophily values
    #[arg(short = 'H', num_args = 1.., default_values_t = DEFAULT_HOMOPHILY)]
    pub homophily: Vec<f64>,

    /// Triadic closure probabilities
    #[arg(long = "tc", num_args = 1.., default_values_t = DEFAULT_TRIADIC_CLOSURE)]
    pub triadic_closure: Vec<f64>,

    /// Global link formation mechanisms
    #[arg(long = "lfm-global", value_enum, num_args = 1.., default_values_t = Lfm::ALL)]
    pub lfm_global: Vec<Lfm>,

    /// Local link formation mechanisms
    #[arg(long = "lfm-local", value_enum, num_args = 1.., default_values_t = Lfm::ALL)]
    pub lfm_local: Vec<Lfm>,

    /// Span the mechanism axis by model names (ERPATCH, TCH, PATCH) instead
    #[arg(long, num_args = 1.., conflicts_with_all = ["lfm_global", "lfm_local"])]
    pub models: Option<Vec<ModelName>>,

    /// With --models, also run every model with uniform triadic closure
    #[arg(long, requires = "models")]
    pub include_tcu: bool,

    /// Realizations per parameter combination
    #[arg(short = 'r', long, default_value_t = DEFAULT_REALIZATIONS)]
    pub realizations: usize,

    /// Worker threads (0 = one per CPU)
    #[arg(long = "n-processes", default_value_t = 1)]
    pub n_processes: usize,

    /// Columns of the results CSV
    #[arg(long, value_enum, default_value_t = RowLayout::Mechanisms)]
    pub layout: RowLayout,

    /// Base seed; task i is generated with seed + i
    #[arg(long)]
    pub seed: Option<u64>,
}

impl RunArgs {
    pub fn into_config(self) -> SweepConfig {
        let config = SweepConfig::default()
            .with_results_path(self.path_results)
            .with_node_count(self.node_count)
            .with_edges_per_node(self.edges_per_node)
            .with_minority_fractions(self.minority_fractions)
            .with_homophily(self.homophily)
            .with_triadic_closure(self.triadic_closure)
            .with_realizations(self.realizations)
            .with_workers(self.n_processes)
            .with_layout(self.layout);
        let config = match self.models {
            Some(models) => config.with_models(models, self.include_tcu),
            None => config.with_mechanisms(self.lfm_global, self.lfm_local),
        };
        let config = match self.path_graphs {
            Some(dir) => config.with_graphs_dir(dir),
            None => config,
        };
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

#[derive(Args, Debug)]
pub struct TransformArgs {
    #[arg(long = "file-in", default_value = DEFAULT_INPUT)]
    pub file_in: PathBuf,

    #[arg(long = "file-out", default_value = DEFAULT_OUTPUT)]
    pub file_out: PathBuf,
}

/// Outcome of one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSummary {
    Sweep(SweepSummary),
    Transform(TransformSummary),
}

/// Execute a parsed command line
pub fn run_cli(cli: Cli) -> Result<CommandSummary> {
    match cli.command {
        Command::Run(args) => {
            let sweep = Sweep::new(args.into_config(), Arc::new(PatchGenerator::new()));
            Ok(CommandSummary::Sweep(sweep.run()?))
        }
        Command::Transform(args) => {
            let table = MechanismTable::default();
            let summary = transform::transform_file(&args.file_in, &args.file_out, &table)?;
            Ok(CommandSummary::Transform(summary))
        }
    }
}

/// Print a one-line summary for the user
pub fn render_summary<W: Write>(summary: &CommandSummary, out: &mut W) -> std::io::Result<()> {
    match summary {
        CommandSummary::Sweep(s) => writeln!(
            out,
            "dispatched={} skipped={} written={} graphs={}",
            s.dispatched, s.skipped, s.written, s.graphs_written
        ),
        CommandSummary::Transform(s) => writeln!(
            out,
            "read={} written={} dropped={}",
            s.read, s.written, s.dropped
        ),
    }
}
