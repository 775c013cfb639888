use super::record::TimedRequestResult;
use super::statistics::{self, PhaseStatistics};
use crate::error::BenchError;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionTimesStatistics {
    pub connect: PhaseStatistics,
    pub processing: PhaseStatistics,
    pub waiting: PhaseStatistics,
    pub total: PhaseStatistics,
}

/// Append-only collection of request results for one run.
///
/// Results are kept in arrival order, which says nothing about dispatch order.
/// Every derived statistic is computed on demand from the full sample set.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    results: Vec<TimedRequestResult>,
}

impl ResultAggregator {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Vec::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, result: TimedRequestResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[cfg(test)]
    pub fn results(&self) -> &[TimedRequestResult] {
        &self.results
    }

    pub fn failed_requests(&self) -> u64 {
        self.results.iter().filter(|r| !r.is_success()).count() as u64
    }

    pub fn successful_requests(&self) -> u64 {
        self.results.iter().filter(|r| r.is_success()).count() as u64
    }

    pub fn total_time(&self) -> Duration {
        self.results.iter().map(|r| r.total_time()).sum()
    }

    pub fn avg_time(&self) -> Result<Duration, BenchError> {
        if self.is_empty() {
            return Err(BenchError::EmptyResultSet);
        }
        Ok(Duration::from_secs_f64(
            self.total_time().as_secs_f64() / self.len() as f64,
        ))
    }

    pub fn total_bytes(&self) -> u64 {
        self.results.iter().map(|r| r.total_bytes()).sum()
    }

    pub fn html_bytes(&self) -> u64 {
        self.results.iter().map(|r| r.body_bytes()).sum()
    }

    pub fn avg_bytes(&self) -> Result<f64, BenchError> {
        if self.is_empty() {
            return Err(BenchError::EmptyResultSet);
        }
        Ok(self.total_bytes() as f64 / self.results.len() as f64)
    }

    /// Nearest-rank distribution of total request time.
    pub fn distribution(&self) -> Result<Vec<(u8, Duration)>, BenchError> {
        let mut totals = self.seconds(TimedRequestResult::total_time);
        statistics::sort_samples(&mut totals);
        Ok(statistics::percentile_distribution(&totals)?
            .into_iter()
            .map(|(percentile, seconds)| (percentile, Duration::from_secs_f64(seconds)))
            .collect())
    }

    pub fn connection_times(&self) -> Result<ConnectionTimesStatistics, BenchError> {
        Ok(ConnectionTimesStatistics {
            connect: statistics::summarize(&self.seconds(TimedRequestResult::connect_time))?,
            processing: statistics::summarize(&self.seconds(TimedRequestResult::process_time))?,
            waiting: statistics::summarize(&self.seconds(TimedRequestResult::wait_time))?,
            total: statistics::summarize(&self.seconds(TimedRequestResult::total_time))?,
        })
    }

    fn seconds(&self, phase: fn(&TimedRequestResult) -> Duration) -> Vec<f64> {
        self.results
            .iter()
            .map(|result| phase(result).as_secs_f64())
            .collect()
    }
}
