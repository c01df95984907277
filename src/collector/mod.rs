// Dual-source metrics collector: host-mounted procfs/sysfs first, sysinfo as fallback.

mod error;
mod native;
pub mod procfs;
mod roots;

pub use error::CollectError;
pub use roots::{Mode, SourceRoots, host_root_present, resolve_roots};

use tracing::instrument;

use crate::config::CollectorConfig;
use crate::models::{
    CpuSnapshot, DiskSnapshot, MemorySnapshot, Metric, NetworkSnapshot, SystemSnapshot,
};

/// Stateless collector. Every call reads fresh data; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    config: CollectorConfig,
}

impl Collector {
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Probes the host root for this call.
    pub fn roots(&self) -> SourceRoots {
        resolve_roots(&self.config)
    }

    #[instrument(skip(self), fields(collector = "system", operation = "cpu"))]
    pub fn cpu(&self) -> Metric<CpuSnapshot> {
        self.cpu_from(&self.roots())
    }

    pub fn cpu_from(&self, roots: &SourceRoots) -> Metric<CpuSnapshot> {
        with_fallback(
            roots.mode,
            "cpu",
            || procfs::host_cpu(roots),
            || native::native_cpu(&self.config),
        )
    }

    #[instrument(skip(self), fields(collector = "system", operation = "memory"))]
    pub fn memory(&self) -> Metric<MemorySnapshot> {
        self.memory_from(&self.roots())
    }

    pub fn memory_from(&self, roots: &SourceRoots) -> Metric<MemorySnapshot> {
        with_fallback(
            roots.mode,
            "memory",
            || procfs::host_memory(roots),
            native::native_memory,
        )
    }

    #[instrument(skip(self), fields(collector = "system", operation = "disk"))]
    pub fn disk(&self) -> Metric<DiskSnapshot> {
        self.disk_from(&self.roots())
    }

    pub fn disk_from(&self, roots: &SourceRoots) -> Metric<DiskSnapshot> {
        with_fallback(
            roots.mode,
            "disk",
            || procfs::host_disk(roots),
            native::native_disk,
        )
    }

    #[instrument(skip(self), fields(collector = "system", operation = "network"))]
    pub fn network(&self) -> Metric<NetworkSnapshot> {
        self.network_from(&self.roots())
    }

    pub fn network_from(&self, roots: &SourceRoots) -> Metric<NetworkSnapshot> {
        with_fallback(
            roots.mode,
            "network",
            || procfs::host_network(roots),
            native::native_network,
        )
    }

    /// All four metrics plus a capture timestamp. Each metric resolves its own source.
    #[instrument(skip(self), fields(collector = "system", operation = "snapshot"))]
    pub fn snapshot(&self) -> SystemSnapshot {
        let timestamp = now_epoch_secs();
        SystemSnapshot {
            timestamp,
            cpu: self.cpu(),
            memory: self.memory(),
            disk: self.disk(),
            network: self.network(),
        }
    }
}

/// Runs `host` when in host mode and `native` when that fails or when in native mode.
/// Exhausting both degrades to [`Metric::Failed`]; nothing is propagated.
pub fn with_fallback<T>(
    mode: Mode,
    metric: &'static str,
    host: impl FnOnce() -> Result<T, CollectError>,
    native: impl FnOnce() -> Result<T, CollectError>,
) -> Metric<T> {
    if mode == Mode::Host {
        match host() {
            Ok(value) => return Metric::Ok(value),
            Err(e) => {
                tracing::warn!(metric, error = %e, "host-rooted collection failed, using native");
            }
        }
    }
    match native() {
        Ok(value) => Metric::Ok(value),
        Err(e) => {
            tracing::warn!(metric, error = %e, "native collection failed");
            Metric::failed(e.to_string())
        }
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn now_epoch_secs() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
