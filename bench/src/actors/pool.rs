use super::worker::Worker;
use super::WorkItem;
use crate::analytics::record::TimedRequestResult;
use crate::http::executor_factory::ExecutorFactory;
use crate::utils::stop_signal::StopSignal;
use flume::{Receiver, Sender};
use futures::future::join_all;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Fixed set of workers sharing one work channel. Each worker owns its executor.
pub struct WorkerPool {
    handles: Vec<JoinHandle<u64>>,
}

impl WorkerPool {
    pub fn start(
        concurrency: u32,
        work: Receiver<WorkItem>,
        results: Sender<TimedRequestResult>,
        factory: Arc<dyn ExecutorFactory>,
        stop: StopSignal,
    ) -> Self {
        info!("Starting {concurrency} workers...");
        let handles = (1..=concurrency)
            .map(|worker_id| {
                let worker = Worker::new(
                    worker_id,
                    factory.create_executor(),
                    work.clone(),
                    results.clone(),
                    stop.clone(),
                );
                tokio::spawn(worker.run())
            })
            .collect();

        Self { handles }
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every worker and returns the number of requests they executed.
    pub async fn join(self) -> u64 {
        join_all(self.handles)
            .await
            .into_iter()
            .map(|result| match result {
                Ok(completed) => completed,
                Err(e) => {
                    error!("Worker task failed: {e}");
                    0
                }
            })
            .sum()
    }
}
