//! Conversion of `models` layout results into global/local mechanism rows
//! for plotting

use crate::error::{Result, SweepError};
use crate::mechanism::{Lfm, MechanismTable};
use crate::sink::ModelRow;
use patch_core::ModelName;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_INPUT: &str = "data/aggregate_statistics.csv";
pub const DEFAULT_OUTPUT: &str = "data/aggregate_statistics_vis.csv";

const STATS_HEADER: [&str; 8] = [
    "global",
    "local",
    "h",
    "tc",
    "r",
    "gini",
    "ei",
    "stoch_dom",
];

/// Row of the transformed file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MechanismStatsRow {
    pub global: Lfm,
    pub local: Lfm,
    pub h: f64,
    pub tc: f64,
    pub r: usize,
    pub gini: f64,
    pub ei: f64,
    pub stoch_dom: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformSummary {
    pub read: usize,
    pub written: usize,
    /// ERPATCH rows without uniform closure
    pub dropped: usize,
}

/// Translate every row of a `models` CSV
pub fn transform<R: Read, W: Write>(
    input: R,
    output: W,
    table: &MechanismTable,
) -> Result<TransformSummary> {
    let mut reader = csv::Reader::from_reader(input);
    let mut writer = csv::Writer::from_writer(output);
    let mut summary = TransformSummary::default();

    for row in reader.deserialize::<ModelRow>() {
        let row = row?;
        summary.read += 1;
        if row.model_name == ModelName::ErPatch && !row.tcu {
            summary.dropped += 1;
            debug!(
                r = row.r,
                h = row.h,
                tc = row.tc,
                "dropping ERPATCH row without uniform closure"
            );
            continue;
        }
        let (global, local) = table.to_mechanisms(row.tcu, row.model_name)?;
        writer.serialize(MechanismStatsRow {
            global,
            local,
            h: row.h,
            tc: row.tc,
            r: row.r,
            gini: row.gini,
            ei: row.ei,
            stoch_dom: row.stoch_dom,
        })?;
        summary.written += 1;
    }

    // an empty input still gets a header
    if summary.written == 0 {
        writer.write_record(STATS_HEADER)?;
    }
    writer
        .flush()
        .map_err(|e| SweepError::io("transform output", e))?;
    Ok(summary)
}

/// Transform `input` into `output`, creating the output's parent directory
pub fn transform_file(
    input: &Path,
    output: &Path,
    table: &MechanismTable,
) -> Result<TransformSummary> {
    let reader = File::open(input).map_err(|e| SweepError::io(input, e))?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SweepError::io(parent, e))?;
    }
    let writer = File::create(output).map_err(|e| SweepError::io(output, e))?;

    let summary = transform(reader, writer, table)?;
    info!(read = summary.read, input = %input.display(), "read rows");
    info!(
        written = summary.written,
        output = %output.display(),
        "wrote rows"
    );
    Ok(summary)
}
