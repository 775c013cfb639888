pub mod dispatcher;
pub mod pool;
pub mod worker;

use crate::http::target::BenchmarkTarget;
use std::sync::Arc;

/// A unit of work is the target itself, repeated once per request.
pub type WorkItem = Arc<BenchmarkTarget>;
