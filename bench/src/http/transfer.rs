use std::io::ErrorKind;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::time::Instant;

/// Byte counters and first-byte mark of a single request.
#[derive(Debug, Default)]
pub(crate) struct TransferMeter {
    wire_bytes: AtomicU64,
    body_bytes: AtomicU64,
    first_byte: OnceLock<Instant>,
}

impl TransferMeter {
    fn record_read(&self, read: usize) {
        if read == 0 {
            return;
        }
        self.first_byte.get_or_init(Instant::now);
        self.wire_bytes.fetch_add(read as u64, Ordering::Relaxed);
    }

    pub fn record_body(&self, read: usize) {
        self.body_bytes.fetch_add(read as u64, Ordering::Relaxed);
    }

    /// Everything read from the connection: status line, headers and body framing.
    pub fn wire_bytes(&self) -> u64 {
        self.wire_bytes.load(Ordering::Relaxed)
    }

    /// Decoded body payload only.
    pub fn body_bytes(&self) -> u64 {
        self.body_bytes.load(Ordering::Relaxed)
    }

    pub fn first_byte(&self) -> Option<Instant> {
        self.first_byte.get().copied()
    }
}

/// Counts every byte read from the wrapped stream into a [`TransferMeter`].
///
/// A read failing with `UnexpectedEof` ends the stream instead, since many servers close
/// TLS connections without sending `close_notify`.
pub(crate) struct MeteredStream<S> {
    inner: S,
    meter: Arc<TransferMeter>,
}

impl<S> MeteredStream<S> {
    pub fn new(inner: S, meter: Arc<TransferMeter>) -> Self {
        Self { inner, meter }
    }
}

impl<S: AsyncRead + Unpin> AsyncRead for MeteredStream<S> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        let this = self.get_mut();
        let filled = buf.filled().len();
        match Pin::new(&mut this.inner).poll_read(cx, buf) {
            Poll::Ready(Ok(())) => {
                this.meter.record_read(buf.filled().len() - filled);
                Poll::Ready(Ok(()))
            }
            Poll::Ready(Err(error)) if error.kind() == ErrorKind::UnexpectedEof => {
                Poll::Ready(Ok(()))
            }
            other => other,
        }
    }
}

impl<S: AsyncWrite + Unpin> AsyncWrite for MeteredStream<S> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        Pin::new(&mut self.get_mut().inner).poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn should_count_bytes_and_mark_first_read() {
        let (client, mut server) = tokio::io::duplex(64);
        let meter = Arc::new(TransferMeter::default());
        let mut stream = MeteredStream::new(client, meter.clone());
        assert!(meter.first_byte().is_none());

        server.write_all(b"hello").await.unwrap();
        drop(server);
        let mut received = Vec::new();
        stream.read_to_end(&mut received).await.unwrap();

        assert_eq!(received, b"hello");
        assert_eq!(meter.wire_bytes(), 5);
        assert_eq!(meter.body_bytes(), 0);
        assert!(meter.first_byte().is_some());
    }

    #[tokio::test]
    async fn should_pass_writes_through() {
        let (client, mut server) = tokio::io::duplex(64);
        let meter = Arc::new(TransferMeter::default());
        let mut stream = MeteredStream::new(client, meter.clone());

        stream.write_all(b"GET").await.unwrap();
        let mut buffer = [0u8; 3];
        server.read_exact(&mut buffer).await.unwrap();

        assert_eq!(&buffer, b"GET");
        assert_eq!(meter.wire_bytes(), 0);
    }
}
