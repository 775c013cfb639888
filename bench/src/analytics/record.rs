use std::time::Duration;

pub const SUCCESS_STATUS: u16 = 200;

/// Outcome of a single request. `status` is `None` when the request failed before any
/// HTTP status could be read (DNS, refused connection, TLS, timeout, malformed response).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedRequestResult {
    status: Option<u16>,
    total_bytes: u64,
    body_bytes: u64,
    connect_time: Duration,
    wait_time: Duration,
    process_time: Duration,
    total_time: Duration,
}

impl TimedRequestResult {
    /// All durations are measured from the start of the request.
    pub fn new(
        status: Option<u16>,
        total_bytes: u64,
        body_bytes: u64,
        connect_time: Duration,
        wait_time: Duration,
        total_time: Duration,
    ) -> Self {
        Self {
            status,
            total_bytes,
            body_bytes,
            connect_time,
            wait_time,
            process_time: total_time.saturating_sub(connect_time),
            total_time,
        }
    }

    pub fn failed(
        total_bytes: u64,
        body_bytes: u64,
        connect_time: Duration,
        wait_time: Duration,
        total_time: Duration,
    ) -> Self {
        Self::new(
            None,
            total_bytes,
            body_bytes,
            connect_time,
            wait_time,
            total_time,
        )
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Only `200 OK` counts as a success, redirects included in failures.
    pub fn is_success(&self) -> bool {
        self.status() == Some(SUCCESS_STATUS)
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn body_bytes(&self) -> u64 {
        self.body_bytes
    }

    pub fn connect_time(&self) -> Duration {
        self.connect_time
    }

    pub fn wait_time(&self) -> Duration {
        self.wait_time
    }

    pub fn process_time(&self) -> Duration {
        self.process_time
    }

    pub fn total_time(&self) -> Duration {
        self.total_time
    }
}
