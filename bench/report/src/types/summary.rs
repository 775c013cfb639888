use crate::utils::round_float;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

/// Run-wide totals and rates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BenchmarkSummary {
    /// Wall-clock time from the first dispatched request to the last collected result
    #[serde(serialize_with = "round_float")]
    pub elapsed_secs: f64,
    pub complete_requests: u64,
    /// Requests answered with `200 OK`
    pub successful_requests: u64,
    /// Every response other than `200 OK`, plus requests that never got a status
    pub failed_requests: u64,
    pub total_bytes: u64,
    pub html_bytes: u64,
    #[serde(serialize_with = "round_float")]
    pub average_document_length: f64,
    #[serde(serialize_with = "round_float")]
    pub requests_per_second: f64,
    #[serde(serialize_with = "round_float")]
    pub time_per_request_ms: f64,
    #[serde(serialize_with = "round_float")]
    pub time_per_request_across_concurrent_ms: f64,
    #[serde(serialize_with = "round_float")]
    pub transfer_rate_kbytes_per_second: f64,
    /// The run was stopped by an interrupt or the time limit before all requests completed
    pub cancelled: bool,
}

impl BenchmarkSummary {
    pub fn formatted_string(&self) -> ColoredString {
        let text = format!(
            "Completed {} requests ({} OK, {} failed) in {:.3} s: {:.2} requests/s, \
            mean time per request: {:.3} ms, transfer rate: {:.2} KB/s",
            self.complete_requests,
            self.successful_requests,
            self.failed_requests,
            self.elapsed_secs,
            self.requests_per_second,
            self.time_per_request_ms,
            self.transfer_rate_kbytes_per_second,
        );
        if self.cancelled {
            text.yellow()
        } else {
            text.green()
        }
    }
}
