//! `patch-sweep` binary: parameter sweeps and result transforms
//!
//! Logging is installed before anything else so that every stage emits
//! structured events on stderr; the summary goes to stdout.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use patch_sweep::cli::{render_summary, run_cli, Cli};
use patch_sweep::logging;

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("command failed")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        eprintln!("failed to initialise logging: {err}");
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        error!(error = %format!("{err:#}"), "patch-sweep failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
