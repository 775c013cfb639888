use super::statistics::PhaseStatistics;
use crate::error::BenchError;
use crate::runner::BenchmarkOutcome;
use chrono::Utc;
use http_bench_report::{
    connection_times::{ConnectionTimes, PhaseSummary},
    hardware::BenchmarkHardware,
    params::BenchmarkParams,
    percentile::PercentileLatency,
    report::BenchmarkReport,
    summary::BenchmarkSummary,
};

const MILLIS_PER_SEC: f64 = 1000.0;
const BYTES_PER_KB: f64 = 1024.0;

pub struct BenchmarkReportBuilder;

impl BenchmarkReportBuilder {
    /// Fails with [`BenchError::EmptyResultSet`] when no request completed.
    pub fn build(
        hardware: BenchmarkHardware,
        params: BenchmarkParams,
        outcome: &BenchmarkOutcome,
    ) -> Result<BenchmarkReport, BenchError> {
        let aggregator = &outcome.aggregator;
        let elapsed_secs = outcome.elapsed.as_secs_f64();
        let complete_requests = aggregator.len() as u64;
        let total_bytes = aggregator.total_bytes();
        let time_per_request_ms = aggregator.avg_time()?.as_secs_f64() * MILLIS_PER_SEC;

        let summary = BenchmarkSummary {
            elapsed_secs,
            complete_requests,
            successful_requests: aggregator.successful_requests(),
            failed_requests: aggregator.failed_requests(),
            total_bytes,
            html_bytes: aggregator.html_bytes(),
            average_document_length: aggregator.avg_bytes()?,
            requests_per_second: per_second(complete_requests as f64, elapsed_secs),
            time_per_request_ms,
            time_per_request_across_concurrent_ms: time_per_request_ms
                / params.concurrency.max(1) as f64,
            transfer_rate_kbytes_per_second: per_second(total_bytes as f64, elapsed_secs)
                / BYTES_PER_KB,
            cancelled: outcome.cancelled,
        };

        let phases = aggregator.connection_times()?;
        let connection_times = ConnectionTimes::new(
            to_summary(&phases.connect),
            to_summary(&phases.processing),
            to_summary(&phases.waiting),
            to_summary(&phases.total),
        );

        let percentiles = aggregator
            .distribution()?
            .into_iter()
            .map(|(percentile, latency)| {
                PercentileLatency::new(percentile, latency.as_secs_f64() * MILLIS_PER_SEC)
            })
            .collect();

        Ok(BenchmarkReport {
            uuid: uuid::Uuid::new_v4(),
            timestamp: Utc::now().to_rfc3339(),
            hardware,
            params,
            summary,
            connection_times,
            percentiles,
        })
    }
}

fn per_second(value: f64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        value / elapsed_secs
    } else {
        0.0
    }
}

fn to_summary(phase: &PhaseStatistics) -> PhaseSummary {
    PhaseSummary::new(
        phase.min * MILLIS_PER_SEC,
        phase.mean * MILLIS_PER_SEC,
        phase.std_dev * MILLIS_PER_SEC,
        phase.median * MILLIS_PER_SEC,
        phase.max * MILLIS_PER_SEC,
    )
}
