use super::connection_times::ConnectionTimes;
use super::hardware::BenchmarkHardware;
use super::params::BenchmarkParams;
use super::percentile::PercentileLatency;
use super::summary::BenchmarkSummary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

pub const REPORT_FILE_NAME: &str = "report.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct BenchmarkReport {
    /// Benchmark unique identifier
    pub uuid: Uuid,

    /// Timestamp when the benchmark was finished
    pub timestamp: String,

    /// Machine the benchmark was executed on
    pub hardware: BenchmarkHardware,

    /// Benchmark parameters
    pub params: BenchmarkParams,

    /// Totals and rates for the whole run
    pub summary: BenchmarkSummary,

    /// Per-phase connection times
    pub connection_times: ConnectionTimes,

    /// Nearest-rank distribution of total request time
    pub percentiles: Vec<PercentileLatency>,
}

impl BenchmarkReport {
    pub fn dump_to_json(&self, output_dir: &str) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(output_dir)?;

        let report_path = Path::new(output_dir).join(REPORT_FILE_NAME);
        let report_json = serde_json::to_string_pretty(self)?;
        std::fs::write(&report_path, report_json)?;
        info!("Report saved to: {}", report_path.display());
        Ok(report_path)
    }
}
