use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported URL scheme: {0}, expected http or https")]
    UnsupportedScheme(String),
    #[error("URL has no host: {0}")]
    MissingHost(String),
    #[error("Invalid TLS configuration")]
    InvalidTlsConfiguration(#[from] rustls::Error),
    #[error("Invalid TLS server name: {0}")]
    InvalidServerName(String),
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Invalid request")]
    InvalidRequest(#[from] hyper::http::Error),
    #[error("HTTP exchange failed: {0}")]
    HttpError(#[from] hyper::Error),
    #[error("Request timed out after {0:?}")]
    RequestTimeout(Duration),
    #[error("No requests completed, statistics are not available")]
    EmptyResultSet,
    #[error("Cannot write report to: {0}")]
    CannotWriteReport(String),
}
