use crate::error::BenchError;
use bytes::Bytes;
use http_bench_report::scheme::BenchmarkScheme;
use http_body_util::Empty;
use hyper::header::{ACCEPT, CONNECTION, HOST, USER_AGENT};
use hyper::{Method, Request};
use std::fmt::{Display, Formatter};
use url::{Host, Url};

const AGENT: &str = concat!("http-bench/", env!("CARGO_PKG_VERSION"));

/// The URL under test, resolved into everything needed to open a connection and send a GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkTarget {
    url: String,
    scheme: BenchmarkScheme,
    host: String,
    port: u16,
    path: String,
    host_header: String,
}

impl BenchmarkTarget {
    pub fn parse(value: &str) -> Result<Self, BenchError> {
        let url = Url::parse(value)?;
        let scheme = match url.scheme() {
            "http" => BenchmarkScheme::Http,
            "https" => BenchmarkScheme::Https,
            other => return Err(BenchError::UnsupportedScheme(other.to_owned())),
        };

        // IPv6 literals are kept without brackets for connecting, with brackets for `Host`.
        let host = match url.host() {
            Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_owned(),
            Some(Host::Ipv4(address)) => address.to_string(),
            Some(Host::Ipv6(address)) => address.to_string(),
            _ => return Err(BenchError::MissingHost(value.to_owned())),
        };
        let host_header = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_owned(),
            (None, _) => return Err(BenchError::MissingHost(value.to_owned())),
        };
        let port = url
            .port_or_known_default()
            .unwrap_or_else(|| scheme.default_port());

        let mut path = url.path().to_owned();
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        Ok(Self {
            url: value.to_owned(),
            scheme,
            host,
            port,
            path,
            host_header,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn scheme(&self) -> BenchmarkScheme {
        self.scheme
    }

    pub fn is_tls(&self) -> bool {
        self.scheme == BenchmarkScheme::Https
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Builds the `GET` sent on every request of a run. Each one goes over a fresh
    /// connection, so the server is asked to close it once the response is sent.
    pub fn request(&self) -> Result<Request<Empty<Bytes>>, BenchError> {
        Ok(Request::builder()
            .method(Method::GET)
            .uri(self.path.as_str())
            .header(HOST, self.host_header.as_str())
            .header(USER_AGENT, AGENT)
            .header(ACCEPT, "*/*")
            .header(CONNECTION, "close")
            .body(Empty::new())?)
    }
}

impl Display for BenchmarkTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}
