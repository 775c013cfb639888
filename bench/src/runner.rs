use crate::actors::dispatcher::WorkDispatcher;
use crate::actors::pool::WorkerPool;
use crate::analytics::aggregator::ResultAggregator;
use crate::http::executor_factory::ExecutorFactory;
use crate::http::target::BenchmarkTarget;
use crate::utils::stop_signal::StopSignal;
use crate::utils::time_limit::spawn_time_limit;
use human_repr::{HumanCount, HumanDuration};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const PROGRESS_THRESHOLD: u64 = 150;
const MAX_PREALLOCATED_RESULTS: u64 = 1_000_000;

#[derive(Debug, Clone)]
pub struct BenchmarkSettings {
    pub target: Arc<BenchmarkTarget>,
    pub concurrency: u32,
    pub requests: u64,
    pub time_limit: Option<Duration>,
    pub queue_capacity: usize,
}

#[derive(Debug)]
pub struct BenchmarkOutcome {
    pub aggregator: ResultAggregator,
    pub elapsed: Duration,
    pub cancelled: bool,
}

/// Drives one run: a dispatcher feeding a bounded work channel, a pool of workers and
/// the runner itself draining results until it has all of them or the run is stopped.
pub struct BenchmarkRunner {
    settings: BenchmarkSettings,
    factory: Arc<dyn ExecutorFactory>,
    stop: StopSignal,
}

impl BenchmarkRunner {
    pub fn new(
        settings: BenchmarkSettings,
        factory: Arc<dyn ExecutorFactory>,
        stop: StopSignal,
    ) -> Self {
        Self {
            settings,
            factory,
            stop,
        }
    }

    pub async fn run(self) -> BenchmarkOutcome {
        let requests = self.settings.requests;
        let (work_sender, work_receiver) = flume::bounded(self.settings.queue_capacity.max(1));
        let (result_sender, result_receiver) = flume::unbounded();

        let started_at = Instant::now();
        let pool = WorkerPool::start(
            self.settings.concurrency,
            work_receiver,
            result_sender,
            self.factory.clone(),
            self.stop.clone(),
        );
        let dispatcher = tokio::spawn(
            WorkDispatcher::new(
                self.settings.target.clone(),
                requests,
                work_sender,
                self.stop.clone(),
            )
            .run(),
        );
        let watchdog = self
            .settings
            .time_limit
            .map(|limit| spawn_time_limit(limit, self.stop.clone()));

        let progress_step = if requests >= PROGRESS_THRESHOLD {
            requests / 10
        } else {
            0
        };
        let mut aggregator =
            ResultAggregator::with_capacity(requests.min(MAX_PREALLOCATED_RESULTS) as usize);
        let mut received = 0;
        while received < requests {
            let result = tokio::select! {
                biased;
                _ = self.stop.stopped() => break,
                result = result_receiver.recv_async() => match result {
                    Ok(result) => result,
                    Err(_) => break,
                },
            };

            aggregator.add(result);
            received += 1;
            if progress_step > 0 && received % progress_step == 0 && received < requests {
                info!(
                    "Completed {} requests ({}% done, {})",
                    received.human_count_bare(),
                    received * 100 / requests,
                    started_at.elapsed().human_duration()
                );
            }
        }

        let cancelled = received < requests;
        if cancelled {
            warn!(
                "Benchmark stopped after {} of {} requests, waiting for in-flight requests...",
                received.human_count_bare(),
                requests.human_count_bare()
            );
        }

        let dispatched = dispatcher.await.unwrap_or_default();
        let workers = pool.size();
        let executed = pool.join().await;
        for result in result_receiver.try_iter() {
            if received == requests {
                break;
            }
            aggregator.add(result);
            received += 1;
        }
        let elapsed = started_at.elapsed();
        if let Some(watchdog) = watchdog {
            watchdog.abort();
        }

        debug!(
            "Dispatched {dispatched} requests, {workers} workers executed {executed}, collected {received}"
        );
        info!(
            "Finished {} requests in {}",
            received.human_count_bare(),
            elapsed.human_duration()
        );

        BenchmarkOutcome {
            aggregator,
            elapsed,
            cancelled,
        }
    }
}
