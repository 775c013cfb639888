use super::defaults::*;
use crate::error::BenchError;
use crate::http::target::BenchmarkTarget;
use crate::runner::BenchmarkSettings;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use http_bench_report::params::BenchmarkParams;
use std::num::{NonZeroU32, NonZeroU64, NonZeroUsize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct HttpBenchArgs {
    /// Number of requests to keep in flight at the same time
    #[arg(long, short = 'c', default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: NonZeroU32,

    /// Total number of requests to perform, 50000 when only --timelimit is given
    #[arg(long, short = 'n')]
    pub requests: Option<NonZeroU32>,

    /// Maximum number of seconds to spend benchmarking
    #[arg(long = "timelimit", short = 't')]
    pub time_limit: Option<NonZeroU64>,

    /// Seconds to wait for a single request before it is counted as failed
    #[arg(long = "timeout", short = 's', default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout: NonZeroU64,

    /// Capacity of the queue between the dispatcher and the workers
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: NonZeroUsize,

    /// Accept any TLS certificate presented by the server
    #[arg(long, short = 'k', default_value_t = DEFAULT_SKIP_TLS_VALIDATION)]
    pub insecure: bool,

    /// Output directory path for storing the JSON report
    #[arg(long, short = 'o')]
    pub output_dir: Option<String>,

    /// Identifier for the benchmark run (e.g., machine name), defaults to the hostname
    #[arg(long)]
    pub identifier: Option<String>,

    /// Additional remark for the benchmark (e.g., no-cache)
    #[arg(long)]
    pub remark: Option<String>,

    /// Target URL, http:// or https://
    #[arg(value_parser = validate_url)]
    pub url: String,
}

fn validate_url(v: &str) -> Result<String, String> {
    BenchmarkTarget::parse(v)
        .map(|_| v.to_owned())
        .map_err(|e| e.to_string())
}

impl HttpBenchArgs {
    pub fn validate(&self) {
        if self.output_dir.is_none() && (self.identifier.is_some() || self.remark.is_some()) {
            HttpBenchArgs::command()
                .error(
                    ErrorKind::ArgumentConflict,
                    "--identifier, --remark can only be used with --output-dir",
                )
                .exit();
        }
    }

    pub fn requests(&self) -> u64 {
        match (self.requests, self.time_limit) {
            (Some(requests), _) => requests.get() as u64,
            (None, Some(_)) => DEFAULT_REQUESTS_WITH_TIME_LIMIT.get() as u64,
            (None, None) => DEFAULT_REQUESTS.get() as u64,
        }
    }

    pub fn concurrency(&self) -> u32 {
        self.concurrency.get()
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit.map(|secs| Duration::from_secs(secs.get()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.get())
    }

    pub fn output_dir(&self) -> Option<String> {
        self.output_dir.clone()
    }

    pub fn identifier(&self) -> Option<String> {
        self.identifier.clone()
    }

    pub fn settings(&self) -> Result<BenchmarkSettings, BenchError> {
        Ok(BenchmarkSettings {
            target: Arc::new(BenchmarkTarget::parse(&self.url)?),
            concurrency: self.concurrency(),
            requests: self.requests(),
            time_limit: self.time_limit(),
            queue_capacity: self.queue_capacity.get(),
        })
    }

    pub fn params(&self, settings: &BenchmarkSettings) -> BenchmarkParams {
        let target = &settings.target;
        BenchmarkParams {
            url: target.url().to_owned(),
            scheme: target.scheme(),
            host: target.host().to_owned(),
            port: target.port(),
            path: target.path().to_owned(),
            concurrency: settings.concurrency,
            requests: settings.requests,
            time_limit_secs: self.time_limit.map(NonZeroU64::get),
            timeout_secs: self.request_timeout.get(),
            queue_capacity: settings.queue_capacity,
            remark: self.remark.clone(),
            bench_command: recreate_bench_command(self),
        }
    }
}

/// Rebuilds a command line reproducing this run, skipping arguments left at their defaults.
fn recreate_bench_command(args: &HttpBenchArgs) -> String {
    let mut parts = vec!["http-bench".to_string()];

    if args.concurrency != DEFAULT_CONCURRENCY {
        parts.push(format!("-c {}", args.concurrency));
    }

    if let Some(requests) = args.requests {
        parts.push(format!("-n {}", requests));
    }

    if let Some(time_limit) = args.time_limit {
        parts.push(format!("-t {}", time_limit));
    }

    if args.request_timeout != DEFAULT_REQUEST_TIMEOUT_SECS {
        parts.push(format!("-s {}", args.request_timeout));
    }

    if args.queue_capacity != DEFAULT_QUEUE_CAPACITY {
        parts.push(format!("--queue-capacity {}", args.queue_capacity));
    }

    if args.insecure {
        parts.push("--insecure".to_string());
    }

    if let Some(ref remark) = args.remark {
        parts.push(format!("--remark \'{}\'", remark));
    }

    if let Some(ref output_dir) = args.output_dir {
        parts.push(format!("--output-dir \'{}\'", output_dir));
    }

    parts.push(args.url.clone());
    parts.join(" ")
}
