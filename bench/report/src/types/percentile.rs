use crate::utils::round_float;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, derive_new::new)]
pub struct PercentileLatency {
    pub percentile: u8,
    #[serde(serialize_with = "round_float")]
    pub latency_ms: f64,
}

impl PercentileLatency {
    pub fn is_longest(&self) -> bool {
        self.percentile == 100
    }
}
