use super::WorkItem;
use crate::utils::stop_signal::StopSignal;
use flume::Sender;
use human_repr::HumanCount;
use tracing::{debug, info};

/// Enqueues the target once per request into the bounded work channel, then closes it.
///
/// A full channel suspends the dispatcher until a worker takes an item.
pub struct WorkDispatcher {
    item: WorkItem,
    requests: u64,
    sender: Sender<WorkItem>,
    stop: StopSignal,
}

impl WorkDispatcher {
    pub fn new(item: WorkItem, requests: u64, sender: Sender<WorkItem>, stop: StopSignal) -> Self {
        Self {
            item,
            requests,
            sender,
            stop,
        }
    }

    /// Returns how many items were enqueued. Dropping the sender on return closes the
    /// channel, which is how workers learn there is no more work.
    pub async fn run(self) -> u64 {
        info!(
            "Dispatching {} requests to {}...",
            self.requests.human_count_bare(),
            self.item
        );
        let mut dispatched = 0;
        while dispatched < self.requests {
            if self.stop.is_stopped() {
                break;
            }

            let sent = tokio::select! {
                biased;
                _ = self.stop.stopped() => false,
                sent = self.sender.send_async(self.item.clone()) => sent.is_ok(),
            };
            if !sent {
                break;
            }
            dispatched += 1;
        }

        debug!("Dispatcher finished after enqueuing {dispatched} requests");
        dispatched
    }
}
