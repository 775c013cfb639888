use crate::report::BenchmarkReport;
use colored::Colorize;
use std::fmt::{self, Display, Formatter};
use tracing::info;

impl BenchmarkReport {
    pub fn print_summary(&self) {
        println!("{self}");
        if self.summary.cancelled {
            println!(
                "{}",
                "Benchmark was stopped before all requests completed".yellow()
            );
        }
        info!("Load generated on {}", self.hardware.describe());
        info!("{}", self.summary.formatted_string());
    }
}

/// The report in the ApacheBench layout.
impl Display for BenchmarkReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let params = &self.params;
        let summary = &self.summary;

        writeln!(f, "Server Hostname:        {}", params.host)?;
        writeln!(f, "Server Port:            {}", params.port)?;
        writeln!(f, "Document Path:          {}", params.path)?;
        writeln!(
            f,
            "Average Document Length: {:.0} bytes",
            summary.average_document_length
        )?;
        writeln!(f)?;
        writeln!(f, "Concurrency Level:      {}", params.concurrency)?;
        writeln!(
            f,
            "Time taken for tests:   {:.3} seconds",
            summary.elapsed_secs
        )?;
        writeln!(f, "Complete requests:      {}", summary.complete_requests)?;
        writeln!(f, "Failed requests:        {}", summary.failed_requests)?;
        writeln!(f, "Total transferred:      {} bytes", summary.total_bytes)?;
        writeln!(f, "HTML transferred:       {} bytes", summary.html_bytes)?;
        writeln!(
            f,
            "Requests per second:    {:.2} [#/sec] (mean)",
            summary.requests_per_second
        )?;
        writeln!(
            f,
            "Time per request:       {:.3} [ms] (mean)",
            summary.time_per_request_ms
        )?;
        writeln!(
            f,
            "Time per request:       {:.3} [ms] (mean, across all concurrent requests)",
            summary.time_per_request_across_concurrent_ms
        )?;
        writeln!(
            f,
            "Transfer rate:          {:.2} [Kbytes/sec] received",
            summary.transfer_rate_kbytes_per_second
        )?;
        writeln!(f)?;
        writeln!(f, "Connection Times (ms)")?;
        writeln!(f, "              min  mean[+/-sd] median   max")?;
        for (name, phase) in self.connection_times.rows() {
            writeln!(
                f,
                "{:<11} {:>5} {:>5} {:>5.1} {:>6} {:>7}",
                format!("{name}:"),
                phase.min_ms.round() as i64,
                phase.mean_ms.round() as i64,
                phase.std_dev_ms,
                phase.median_ms.round() as i64,
                phase.max_ms.round() as i64,
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Percentage of the requests served within a certain time (ms)"
        )?;
        for entry in &self.percentiles {
            write!(f, " {:>3}% {:>6.0}", entry.percentile, entry.latency_ms)?;
            if entry.is_longest() {
                write!(f, " (longest request)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
