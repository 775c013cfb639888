use derive_more::derive::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, Default, Hash)]
pub enum BenchmarkScheme {
    #[default]
    #[display("http")]
    #[serde(rename = "http")]
    Http,
    #[display("https")]
    #[serde(rename = "https")]
    Https,
}

impl BenchmarkScheme {
    pub fn default_port(&self) -> u16 {
        match self {
            BenchmarkScheme::Http => 80,
            BenchmarkScheme::Https => 443,
        }
    }
}
