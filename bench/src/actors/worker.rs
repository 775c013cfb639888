use super::WorkItem;
use crate::analytics::record::TimedRequestResult;
use crate::http::executor::RequestExecutor;
use crate::utils::stop_signal::StopSignal;
use flume::{Receiver, Sender};
use tracing::debug;

pub struct Worker {
    worker_id: u32,
    executor: Box<dyn RequestExecutor>,
    work: Receiver<WorkItem>,
    results: Sender<TimedRequestResult>,
    stop: StopSignal,
}

impl Worker {
    pub fn new(
        worker_id: u32,
        executor: Box<dyn RequestExecutor>,
        work: Receiver<WorkItem>,
        results: Sender<TimedRequestResult>,
        stop: StopSignal,
    ) -> Self {
        Self {
            worker_id,
            executor,
            work,
            results,
            stop,
        }
    }

    /// Pulls work until the channel is closed or the stop signal is set. A request that
    /// is already in flight always runs to completion and its result is delivered.
    pub async fn run(mut self) -> u64 {
        let mut completed = 0;
        while !self.stop.is_stopped() {
            let target = tokio::select! {
                biased;
                _ = self.stop.stopped() => break,
                item = self.work.recv_async() => match item {
                    Ok(target) => target,
                    Err(_) => break,
                },
            };

            let result = self.executor.execute(&target).await;
            completed += 1;
            if self.results.send(result).is_err() {
                break;
            }
        }

        debug!(
            "Worker #{} finished after {} requests",
            self.worker_id, completed
        );
        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::target::BenchmarkTarget;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct StubExecutor {
        delay: Duration,
        on_execute: Option<StopSignal>,
    }

    #[async_trait]
    impl RequestExecutor for StubExecutor {
        async fn execute(&mut self, _target: &BenchmarkTarget) -> TimedRequestResult {
            if let Some(stop) = &self.on_execute {
                stop.trigger();
            }
            tokio::time::sleep(self.delay).await;
            TimedRequestResult::new(
                Some(200),
                10,
                5,
                Duration::ZERO,
                Duration::ZERO,
                self.delay,
            )
        }
    }

    fn item() -> WorkItem {
        Arc::new(BenchmarkTarget::parse("http://localhost/").unwrap())
    }

    #[tokio::test]
    async fn should_execute_every_item_until_channel_closes() {
        let (work_sender, work_receiver) = flume::bounded(10);
        let (result_sender, result_receiver) = flume::unbounded();
        for _ in 0..4 {
            work_sender.send(item()).unwrap();
        }
        drop(work_sender);
        let executor = Box::new(StubExecutor {
            delay: Duration::ZERO,
            on_execute: None,
        });

        let completed = Worker::new(1, executor, work_receiver, result_sender, StopSignal::new())
            .run()
            .await;

        assert_eq!(completed, 4);
        assert_eq!(result_receiver.drain().count(), 4);
    }

    #[tokio::test]
    async fn should_finish_in_flight_request_after_stop() {
        let (work_sender, work_receiver) = flume::bounded(10);
        let (result_sender, result_receiver) = flume::unbounded();
        for _ in 0..5 {
            work_sender.send(item()).unwrap();
        }
        let stop = StopSignal::new();
        let executor = Box::new(StubExecutor {
            delay: Duration::from_millis(20),
            on_execute: Some(stop.clone()),
        });

        let completed = Worker::new(1, executor, work_receiver, result_sender, stop)
            .run()
            .await;

        assert_eq!(completed, 1);
        assert_eq!(result_receiver.drain().count(), 1);
        assert_eq!(work_sender.len(), 4);
    }
}
