// CPU, memory and full-system snapshot models

use serde::{Deserialize, Serialize};

use super::{DiskSnapshot, Metric, NetworkSnapshot};

/// Per-core utilization and core-0 clock frequency.
///
/// `cpu_per_core.len() == cpu_count` whenever both come from the same source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuSnapshot {
    pub cpu_per_core: Vec<f64>,
    /// MHz
    pub cpu_freq_current: f64,
    pub cpu_freq_min: f64,
    pub cpu_freq_max: f64,
    pub cpu_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub memory_total: u64,
    pub memory_available: u64,
    pub memory_used: u64,
    pub memory_percent: f64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_free: u64,
    pub swap_percent: f64,
}

/// Everything collected in one request. `timestamp` is fractional seconds since the epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub timestamp: f64,
    pub cpu: Metric<CpuSnapshot>,
    pub memory: Metric<MemorySnapshot>,
    pub disk: Metric<DiskSnapshot>,
    pub network: Metric<NetworkSnapshot>,
}
