mod actors;
mod analytics;
mod args;
mod error;
mod http;
mod runner;
mod utils;

use crate::analytics::report_builder::BenchmarkReportBuilder;
use crate::args::common::HttpBenchArgs;
use crate::error::BenchError;
use crate::http::executor_factory::HttpExecutorFactory;
use crate::runner::BenchmarkRunner;
use crate::utils::stop_signal::{stop_on_ctrl_c, StopSignal};
use clap::Parser;
use http_bench_report::hardware::BenchmarkHardware;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[tokio::main]
async fn main() -> Result<(), BenchError> {
    let args = HttpBenchArgs::parse();
    args.validate();

    Registry::default()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("INFO")))
        .init();

    let settings = args.settings()?;
    let params = args.params(&settings);
    let factory = Arc::new(HttpExecutorFactory::new(
        args.request_timeout(),
        args.insecure,
    )?);

    let stop = StopSignal::new();
    stop_on_ctrl_c(stop.clone());

    println!(
        "Benchmarking {} (be patient)...",
        settings.target.host()
    );
    info!(
        "Starting to benchmark: {} with {} requests, concurrency: {}",
        settings.target, settings.requests, settings.concurrency
    );
    let outcome = BenchmarkRunner::new(settings, factory, stop).run().await;

    let identifier = args.identifier().or_else(local_hostname);
    let hardware = BenchmarkHardware::collect(identifier);
    let report = BenchmarkReportBuilder::build(hardware, params, &outcome).inspect_err(|e| {
        error!("Cannot build the report: {e}");
    })?;

    report.print_summary();

    if let Some(output_dir) = args.output_dir() {
        report.dump_to_json(&output_dir).map_err(|e| {
            error!("Failed to write the report: {e}");
            BenchError::CannotWriteReport(output_dir)
        })?;
    }

    Ok(())
}

fn local_hostname() -> Option<String> {
    hostname::get()
        .ok()
        .map(|name| name.to_string_lossy().into_owned())
}
