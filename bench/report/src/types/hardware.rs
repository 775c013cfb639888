use serde::{Deserialize, Serialize};
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

const UNKNOWN: &str = "unknown";

/// The machine generating the load. Its CPU and memory bound the throughput a run can
/// measure, so they are stored next to the results.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct BenchmarkHardware {
    pub identifier: Option<String>,
    pub cpu_name: String,
    pub logical_cpus: usize,
    pub total_memory_mb: u64,
    pub available_memory_mb: u64,
    pub os: String,
    pub kernel_version: String,
}

impl BenchmarkHardware {
    pub fn collect(identifier: Option<String>) -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::nothing())
                .with_memory(MemoryRefreshKind::nothing().with_ram()),
        );

        let cpu_name = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_owned())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_owned());

        Self {
            identifier,
            cpu_name,
            logical_cpus: sys.cpus().len(),
            total_memory_mb: to_megabytes(sys.total_memory()),
            available_memory_mb: to_megabytes(sys.available_memory()),
            os: System::long_os_version().unwrap_or_else(|| UNKNOWN.to_owned()),
            kernel_version: System::kernel_version().unwrap_or_else(|| UNKNOWN.to_owned()),
        }
    }

    /// One-line description used in the printed summary.
    pub fn describe(&self) -> String {
        let mut line = format!(
            "{} ({} logical CPUs), {} MB RAM, {}",
            self.cpu_name, self.logical_cpus, self.total_memory_mb, self.os
        );
        if let Some(identifier) = &self.identifier {
            line.push_str(&format!(" [{identifier}]"));
        }
        line
    }
}

fn to_megabytes(bytes: u64) -> u64 {
    bytes / 1024 / 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_collect_local_machine_description() {
        let hardware = BenchmarkHardware::collect(Some("bench-host".to_owned()));

        assert_eq!(hardware.identifier.as_deref(), Some("bench-host"));
        assert!(!hardware.cpu_name.is_empty());
        assert!(hardware.available_memory_mb <= hardware.total_memory_mb);
    }

    #[test]
    fn should_describe_hardware_with_identifier() {
        let hardware = BenchmarkHardware {
            identifier: Some("runner-1".to_owned()),
            cpu_name: "Test CPU".to_owned(),
            logical_cpus: 8,
            total_memory_mb: 16_384,
            available_memory_mb: 8_000,
            os: "Linux 6.1".to_owned(),
            kernel_version: "6.1.0".to_owned(),
        };

        assert_eq!(
            hardware.describe(),
            "Test CPU (8 logical CPUs), 16384 MB RAM, Linux 6.1 [runner-1]"
        );
    }
}
