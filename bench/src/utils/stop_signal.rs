use futures::stream::{self, Stream, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::warn;

#[derive(Debug, Default)]
struct StopSignalInner {
    stopped: AtomicBool,
    notify: Notify,
}

/// Process-wide cooperative cancellation flag shared by the dispatcher, workers and runner.
///
/// Setting it is idempotent. Nothing is interrupted forcibly, every holder checks the
/// flag at its own safe points or awaits [`StopSignal::stopped`].
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<StopSignalInner>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` only for the call that actually flipped the flag.
    pub fn trigger(&self) -> bool {
        if self.inner.stopped.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.inner.notify.notify_waiters();
        true
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::Acquire)
    }

    /// Completes once the signal has been triggered.
    pub async fn stopped(&self) {
        loop {
            // Registered before the check so a concurrent trigger cannot be missed.
            let notified = self.inner.notify.notified();
            if self.is_stopped() {
                return;
            }
            notified.await;
        }
    }
}

/// Exit code of a process killed by SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Triggers the signal on the first Ctrl-C and exits the process on the next one.
pub fn stop_on_ctrl_c(stop: StopSignal) {
    tokio::spawn(async move {
        let interrupts = stream::unfold((), |_| async {
            tokio::signal::ctrl_c().await.ok().map(|_| ((), ()))
        });
        if escalate_interrupts(interrupts, stop).await {
            warn!("Interrupted again, exiting without waiting for in-flight requests");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    });
}

/// Returns `true` when an interrupt arrives while the run is already stopping.
async fn escalate_interrupts(interrupts: impl Stream<Item = ()>, stop: StopSignal) -> bool {
    let mut interrupts = std::pin::pin!(interrupts);
    while interrupts.next().await.is_some() {
        if !stop.trigger() {
            return true;
        }
        warn!("Interrupted, waiting for in-flight requests to finish (Ctrl-C again to exit)...");
    }
    false
}
