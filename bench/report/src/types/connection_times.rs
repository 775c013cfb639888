use crate::utils::round_float;
use serde::{Deserialize, Serialize};

/// Five-number summary of a single request phase, in milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default, derive_new::new)]
pub struct PhaseSummary {
    #[serde(serialize_with = "round_float")]
    pub min_ms: f64,
    #[serde(serialize_with = "round_float")]
    pub mean_ms: f64,
    /// Sample standard deviation (n - 1 denominator), zero for a single sample
    #[serde(serialize_with = "round_float")]
    pub std_dev_ms: f64,
    /// Element at index `n / 2` of the sorted samples
    #[serde(serialize_with = "round_float")]
    pub median_ms: f64,
    #[serde(serialize_with = "round_float")]
    pub max_ms: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default, derive_new::new)]
pub struct ConnectionTimes {
    pub connect: PhaseSummary,
    pub processing: PhaseSummary,
    pub waiting: PhaseSummary,
    pub total: PhaseSummary,
}

impl ConnectionTimes {
    pub fn rows(&self) -> [(&'static str, &PhaseSummary); 4] {
        [
            ("Connect", &self.connect),
            ("Processing", &self.processing),
            ("Waiting", &self.waiting),
            ("Total", &self.total),
        ]
    }
}
