use crate::error::BenchError;
use crate::http::connection::Connector;
use crate::http::executor::{HttpExecutor, RequestExecutor};
use std::time::Duration;

/// Builds one executor per worker; executors are never shared between workers.
pub trait ExecutorFactory: Sync + Send {
    fn create_executor(&self) -> Box<dyn RequestExecutor>;
}

pub struct HttpExecutorFactory {
    connector: Connector,
    request_timeout: Duration,
}

impl HttpExecutorFactory {
    pub fn new(request_timeout: Duration, skip_tls_validation: bool) -> Result<Self, BenchError> {
        Ok(Self {
            connector: Connector::new(skip_tls_validation)?,
            request_timeout,
        })
    }
}

impl ExecutorFactory for HttpExecutorFactory {
    fn create_executor(&self) -> Box<dyn RequestExecutor> {
        Box::new(HttpExecutor::new(
            self.connector.clone(),
            self.request_timeout,
        ))
    }
}
