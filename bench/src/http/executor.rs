use crate::analytics::record::TimedRequestResult;
use crate::error::BenchError;
use crate::http::connection::Connector;
use crate::http::target::BenchmarkTarget;
use crate::http::transfer::{MeteredStream, TransferMeter};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout, Instant};
use tracing::debug;

#[async_trait]
pub trait RequestExecutor: Send {
    /// Performs a single GET. Transport failures are reported in the returned result,
    /// never as an error.
    async fn execute(&mut self, target: &BenchmarkTarget) -> TimedRequestResult;
}

/// Marks when each phase of a request completed, relative to its start.
struct PhaseTimer {
    start: Instant,
    connected: Option<Duration>,
    first_byte: Option<Duration>,
}

impl PhaseTimer {
    fn start() -> Self {
        Self {
            start: Instant::now(),
            connected: None,
            first_byte: None,
        }
    }

    fn mark_connected(&mut self) {
        self.connected = Some(self.start.elapsed());
    }

    fn mark_first_byte(&mut self, at: Option<Instant>) {
        self.first_byte = at.map(|at| at.saturating_duration_since(self.start));
    }

    fn connect_time(&self) -> Duration {
        self.connected.unwrap_or_default()
    }

    /// Never earlier than the connect mark, a response cannot start before the connection.
    fn wait_time(&self) -> Duration {
        self.first_byte
            .map_or_else(|| self.connect_time(), |wait| wait.max(self.connect_time()))
    }
}

/// HTTP/1.1 executor owned by exactly one worker. The transfer meter is replaced at
/// the start of every `execute`, so byte counts never leak between requests.
pub struct HttpExecutor {
    connector: Connector,
    request_timeout: Duration,
    meter: Arc<TransferMeter>,
}

impl HttpExecutor {
    pub(crate) fn new(connector: Connector, request_timeout: Duration) -> Self {
        Self {
            connector,
            request_timeout,
            meter: Arc::default(),
        }
    }

    fn clear_counters(&mut self) {
        self.meter = Arc::default();
    }

    async fn perform(
        &self,
        target: &BenchmarkTarget,
        timer: &mut PhaseTimer,
    ) -> Result<u16, BenchError> {
        let request = target.request()?;
        let stream = self.connector.connect(target).await?;
        timer.mark_connected();

        let io = TokioIo::new(MeteredStream::new(stream, self.meter.clone()));
        let (mut sender, connection) = http1::handshake::<_, Empty<Bytes>>(io).await?;
        let meter = self.meter.clone();
        let exchange = async move {
            let response = sender.send_request(request).await?;
            let status = response.status().as_u16();
            let mut body = response.into_body();
            while let Some(frame) = body.frame().await {
                if let Some(data) = frame?.data_ref() {
                    meter.record_body(data.len());
                }
            }
            Ok::<_, BenchError>(status)
        };

        // The connection is driven in place, it ends once the response is read and the
        // sender is dropped.
        let (status, connection) = tokio::join!(exchange, connection);
        if let Err(error) = connection {
            debug!("Connection to {target} ended with: {error}");
        }
        status
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&mut self, target: &BenchmarkTarget) -> TimedRequestResult {
        self.clear_counters();
        let request_timeout = self.request_timeout;
        let mut timer = PhaseTimer::start();

        let outcome = match timeout(request_timeout, self.perform(target, &mut timer)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(BenchError::RequestTimeout(request_timeout)),
        };
        let total_time = timer.start.elapsed();
        timer.mark_first_byte(self.meter.first_byte());
        let total_bytes = self.meter.wire_bytes();
        let body_bytes = self.meter.body_bytes();

        match outcome {
            Ok(status) => TimedRequestResult::new(
                Some(status),
                total_bytes,
                body_bytes,
                timer.connect_time(),
                timer.wait_time(),
                total_time,
            ),
            Err(error) => {
                debug!("Request to {target} failed: {error}");
                TimedRequestResult::failed(
                    total_bytes,
                    body_bytes,
                    timer.connect_time(),
                    timer.wait_time(),
                    total_time,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves `response` to every connection after reading the request head.
    async fn serve(response: &'static [u8]) -> BenchmarkTarget {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buffer = [0u8; 1024];
                    while !request.ends_with(b"\r\n\r\n") {
                        match socket.read(&mut buffer).await {
                            Ok(0) | Err(_) => return,
                            Ok(read) => request.extend_from_slice(&buffer[..read]),
                        }
                    }
                    let _ = socket.write_all(response).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        BenchmarkTarget::parse(&format!("http://{address}/index.html")).unwrap()
    }

    fn executor(request_timeout: Duration) -> HttpExecutor {
        HttpExecutor::new(Connector::new(false).unwrap(), request_timeout)
    }

    const HEAD_WITH_LENGTH: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 11\r\n\r\n";

    #[tokio::test]
    async fn should_count_head_and_body_bytes_with_content_length() {
        let target = serve(b"HTTP/1.1 200 OK\r\nContent-Length: 11\r\n\r\nhello world").await;
        let mut executor = executor(Duration::from_secs(5));

        let result = executor.execute(&target).await;

        assert_eq!(result.status(), Some(200));
        assert_eq!(result.body_bytes(), 11);
        assert_eq!(result.total_bytes(), HEAD_WITH_LENGTH.len() as u64 + 11);
        assert!(result.connect_time() <= result.wait_time());
        assert!(result.wait_time() <= result.total_time());
        assert_eq!(
            result.process_time(),
            result.total_time() - result.connect_time()
        );
    }

    #[tokio::test]
    async fn should_reset_counters_between_requests() {
        let target = serve(b"HTTP/1.1 200 OK\r\nContent-Length: 11\r\n\r\nhello world").await;
        let mut executor = executor(Duration::from_secs(5));

        let first = executor.execute(&target).await;
        let second = executor.execute(&target).await;

        assert_eq!(first.total_bytes(), second.total_bytes());
        assert_eq!(second.body_bytes(), 11);
    }

    #[tokio::test]
    async fn should_count_decoded_payload_of_chunked_body() {
        let target = serve(
            b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n",
        )
        .await;
        let mut executor = executor(Duration::from_secs(5));

        let result = executor.execute(&target).await;

        assert_eq!(result.status(), Some(200));
        assert_eq!(result.body_bytes(), 9);
    }

    #[tokio::test]
    async fn should_read_body_until_connection_is_closed() {
        let target = serve(b"HTTP/1.0 404 Not Found\r\nServer: test\r\n\r\nmissing").await;
        let mut executor = executor(Duration::from_secs(5));

        let result = executor.execute(&target).await;

        assert_eq!(result.status(), Some(404));
        assert_eq!(result.body_bytes(), 7);
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn should_report_refused_connection_as_failed_result() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let target = BenchmarkTarget::parse(&format!("http://127.0.0.1:{port}/")).unwrap();
        let mut executor = executor(Duration::from_secs(5));

        let result = executor.execute(&target).await;

        assert_eq!(result.status(), None);
        assert_eq!(result.total_bytes(), 0);
        assert_eq!(result.connect_time(), Duration::ZERO);
    }

    #[tokio::test]
    async fn should_report_truncated_body_as_failed_result() {
        let target = serve(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nshort").await;
        let mut executor = executor(Duration::from_secs(5));

        let result = executor.execute(&target).await;

        assert_eq!(result.status(), None);
        assert!(result.body_bytes() <= 5);
        assert!(result.total_bytes() > 0);
    }

    #[tokio::test]
    async fn should_accept_head_terminated_by_bare_line_feeds() {
        let target = serve(b"HTTP/1.0 200 OK\nContent-Length: 2\n\nok").await;
        let mut executor = executor(Duration::from_secs(5));

        let result = executor.execute(&target).await;

        assert_eq!(result.status(), Some(200));
        assert_eq!(result.body_bytes(), 2);
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn should_skip_informational_response_and_record_final_status() {
        let target = serve(
            b"HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok",
        )
        .await;
        let mut executor = executor(Duration::from_secs(5));

        let result = executor.execute(&target).await;

        assert_eq!(result.status(), Some(200));
        assert_eq!(result.body_bytes(), 2);
    }

    #[tokio::test]
    async fn should_send_close_and_identification_headers() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            while !request.ends_with(b"\r\n\r\n") {
                let read = socket.read(&mut buffer).await.unwrap();
                request.extend_from_slice(&buffer[..read]);
            }
            socket
                .write_all(b"HTTP/1.1 204 No Content\r\n\r\n")
                .await
                .unwrap();
            String::from_utf8(request).unwrap().to_lowercase()
        });
        let target = BenchmarkTarget::parse(&format!("http://{address}/ping")).unwrap();
        let mut executor = executor(Duration::from_secs(5));

        let result = executor.execute(&target).await;
        let request = server.await.unwrap();

        assert_eq!(result.status(), Some(204));
        assert_eq!(result.body_bytes(), 0);
        assert!(request.starts_with("get /ping http/1.1\r\n"));
        assert!(request.contains(&format!("host: {address}\r\n")));
        assert!(request.contains("connection: close\r\n"));
        assert!(request.contains("user-agent: http-bench/"));
    }

    #[tokio::test]
    async fn should_time_out_when_server_never_answers() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });
        let target = BenchmarkTarget::parse(&format!("http://{address}/")).unwrap();
        let mut executor = executor(Duration::from_millis(200));

        let result = executor.execute(&target).await;

        assert_eq!(result.status(), None);
        assert!(result.connect_time() > Duration::ZERO);
        assert!(result.total_time() >= Duration::from_millis(200));
    }
}
