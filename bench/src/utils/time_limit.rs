use super::stop_signal::StopSignal;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::warn;

/// Stops the benchmark once `limit` elapses, unless it was stopped earlier.
pub fn spawn_time_limit(limit: Duration, stop: StopSignal) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = stop.stopped() => {}
            _ = sleep(limit) => {
                if stop.trigger() {
                    warn!("Time limit of {} s reached, stopping the benchmark...", limit.as_secs_f64());
                }
            }
        }
    })
}
