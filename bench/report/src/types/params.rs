use super::scheme::BenchmarkScheme;
use serde::{Deserialize, Serialize};

/// Parameters the benchmark was started with.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct BenchmarkParams {
    /// Target URL exactly as it was given on the command line
    pub url: String,
    pub scheme: BenchmarkScheme,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub concurrency: u32,
    pub requests: u64,
    pub time_limit_secs: Option<u64>,
    pub timeout_secs: u64,
    pub queue_capacity: usize,
    pub remark: Option<String>,
    pub bench_command: String,
}
