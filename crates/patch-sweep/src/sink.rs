//! Output sinks
//!
//! The aggregator is the only writer: every completed record becomes one
//! CSV row, and optionally one JSON file next to it.

use crate::config::RowLayout;
use crate::error::{Result, SweepError};
use crate::grid::ParameterPoint;
use crate::mechanism::Lfm;
use crate::naming;
use crate::task::StatsRecord;
use csv::{Writer, WriterBuilder};
use patch_core::ModelName;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const MECHANISM_HEADER: [&str; 9] = [
    "f", "h", "tc", "lfm_local", "lfm_global", "r", "gini", "ei", "stoch_dom",
];
pub const MODEL_HEADER: [&str; 9] = [
    "f", "h", "tc", "tcu", "r", "model_name", "gini", "ei", "stoch_dom",
];

/// Destination of completed records
pub trait ResultSink {
    fn write_record(&mut self, record: &StatsRecord) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}

/// Row of the `mechanisms` layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MechanismRow {
    pub f: f64,
    pub h: f64,
    pub tc: f64,
    pub lfm_local: Lfm,
    pub lfm_global: Lfm,
    pub r: usize,
    pub gini: f64,
    pub ei: f64,
    pub stoch_dom: f64,
}

/// Row of the `models` layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelRow {
    pub f: f64,
    pub h: f64,
    pub tc: f64,
    #[serde(deserialize_with = "deserialize_flag")]
    pub tcu: bool,
    pub r: usize,
    pub model_name: ModelName,
    pub gini: f64,
    pub ei: f64,
    pub stoch_dom: f64,
}

impl From<&StatsRecord> for MechanismRow {
    fn from(record: &StatsRecord) -> Self {
        let point = &record.point;
        Self {
            f: point.minority_fraction,
            h: point.homophily,
            tc: point.triadic_closure,
            lfm_local: point.lfm_local,
            lfm_global: point.lfm_global,
            r: point.realization,
            gini: record.metrics.gini,
            ei: record.metrics.ei,
            stoch_dom: record.metrics.stoch_dom,
        }
    }
}

impl From<&StatsRecord> for ModelRow {
    fn from(record: &StatsRecord) -> Self {
        let point = &record.point;
        Self {
            f: point.minority_fraction,
            h: point.homophily,
            tc: point.triadic_closure,
            tcu: record.tc_uniform,
            r: point.realization,
            model_name: record.model,
            gini: record.metrics.gini,
            ei: record.metrics.ei,
            stoch_dom: record.metrics.stoch_dom,
        }
    }
}

/// Accept `true`/`false` as well as the capitalised and numeric spellings
/// found in older result files
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "true" | "True" | "TRUE" | "1" => Ok(true),
        "false" | "False" | "FALSE" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!("invalid boolean `{other}`"))),
    }
}

/// CSV sink writing one row per record in the configured layout
///
/// The header is written on creation, so a sweep without results still
/// leaves a well-formed file.
pub struct CsvSink<W: Write> {
    writer: Writer<W>,
    layout: RowLayout,
    path: PathBuf,
}

impl CsvSink<File> {
    /// Create (or truncate) the results file, creating parent directories
    pub fn create(path: &Path, layout: RowLayout) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SweepError::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| SweepError::io(path, e))?;
        let mut sink = Self::from_writer(file, layout)?;
        sink.path = path.to_path_buf();
        Ok(sink)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(writer: W, layout: RowLayout) -> Result<Self> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
        match layout {
            RowLayout::Mechanisms => writer.write_record(MECHANISM_HEADER)?,
            RowLayout::Models => writer.write_record(MODEL_HEADER)?,
        }
        let mut sink = Self {
            writer,
            layout,
            path: PathBuf::from("<writer>"),
        };
        sink.flush()?;
        Ok(sink)
    }

    pub fn layout(&self) -> RowLayout {
        self.layout
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W> {
        let path = self.path;
        self.writer.into_inner().map_err(|e| {
            let source = std::io::Error::new(e.error().kind(), e.error().to_string());
            SweepError::io(path, source)
        })
    }
}

impl<W: Write> ResultSink for CsvSink<W> {
    fn write_record(&mut self, record: &StatsRecord) -> Result<()> {
        match self.layout {
            RowLayout::Mechanisms => self.writer.serialize(MechanismRow::from(record))?,
            RowLayout::Models => self.writer.serialize(ModelRow::from(record))?,
        }
        // rows become visible as results drain
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| SweepError::io(&self.path, e))
    }
}

/// Directory receiving one JSON file per generated graph
#[derive(Debug, Clone)]
pub struct GraphDump {
    dir: PathBuf,
}

impl GraphDump {
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| SweepError::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the JSON of a point's graph and return the file path
    pub fn write(&self, point: &ParameterPoint, json: &str) -> Result<PathBuf> {
        let path = self.dir.join(naming::graph_file_name(point));
        fs::write(&path, json).map_err(|e| SweepError::io(&path, e))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patch_metrics::{EiIndices, MetricsResult};

    fn record(homophily: f64, stoch_dom: f64) -> StatsRecord {
        StatsRecord {
            point: ParameterPoint {
                node_count: 100,
                edges_per_node: 2,
                minority_fraction: 0.3,
                homophily,
                triadic_closure: 0.5,
                lfm_global: Lfm::Homophily,
                lfm_local: Lfm::Random,
                realization: 1,
            },
            tc_uniform: true,
            model: ModelName::Tch,
            metrics: MetricsResult {
                gini: 0.25,
                ei: -0.5,
                ei_indices: EiIndices {
                    minority: -0.2,
                    majority: -0.6,
                    overall: -0.5,
                },
                stoch_dom,
            },
        }
    }

    fn written(layout: RowLayout, records: &[StatsRecord]) -> String {
        let mut sink = CsvSink::from_writer(Vec::new(), layout).unwrap();
        for record in records {
            sink.write_record(record).unwrap();
        }
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_mechanism_layout() {
        let out = written(RowLayout::Mechanisms, &[record(0.2, 0.1)]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "f,h,tc,lfm_local,lfm_global,r,gini,ei,stoch_dom");
        assert_eq!(lines[1], "0.3,0.2,0.5,random,homophily,1,0.25,-0.5,0.1");
    }

    #[test]
    fn test_model_layout() {
        let out = written(RowLayout::Models, &[record(0.8, 0.1)]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "f,h,tc,tcu,r,model_name,gini,ei,stoch_dom");
        assert_eq!(lines[1], "0.3,0.8,0.5,true,1,TCH,0.25,-0.5,0.1");
    }

    #[test]
    fn test_header_without_rows() {
        let out = written(RowLayout::Models, &[]);
        assert_eq!(out.trim_end(), MODEL_HEADER.join(","));
    }

    #[test]
    fn test_nan_stays_visible() {
        let out = written(RowLayout::Mechanisms, &[record(0.2, f64::NAN)]);
        assert!(out.lines().nth(1).unwrap().ends_with(",NaN"));

        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let row: MechanismRow = reader.deserialize().next().unwrap().unwrap();
        assert!(row.stoch_dom.is_nan());
    }

    #[test]
    fn test_capitalised_flags_parse() {
        let data = "f,h,tc,tcu,r,model_name,gini,ei,stoch_dom\n\
                    0.3,0.2,0.0,True,0,PATCH,0.1,0.2,0.3\n\
                    0.3,0.2,0.0,False,1,ERPATCH,0.1,0.2,nan\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<ModelRow> = reader.deserialize().collect::<csv::Result<_>>().unwrap();
        assert!(rows[0].tcu);
        assert!(!rows[1].tcu);
        assert_eq!(rows[1].model_name, ModelName::ErPatch);
        assert!(rows[1].stoch_dom.is_nan());
    }

    #[test]
    fn test_graph_dump() {
        let dir = tempfile::tempdir().unwrap();
        let dump = GraphDump::create(dir.path().join("graphs")).unwrap();
        let path = dump.write(&record(0.2, 0.0).point, "{}").unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "N-100_m-2_f-0.3_h-0.2_tc-0.5_lfm-l-random_lfm-g-homophily_r-1.json"
        );
        assert_eq!(fs::read_to_string(path).unwrap(), "{}");
    }
}
