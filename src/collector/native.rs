// Native collection through sysinfo (no raw text parsing).

use std::time::Duration;

use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, Networks, RefreshKind, System};

use super::error::CollectError;
use super::procfs::read_cpu0_freq_mhz;
use super::round_to;
use crate::config::CollectorConfig;
use crate::models::{
    CpuSnapshot, DiskPartitionSnapshot, DiskSnapshot, MemorySnapshot, NetworkSnapshot,
};

/// Per-core usage sampled over `cpu_sample_interval_ms`. Blocks the calling thread for that long.
pub fn native_cpu(config: &CollectorConfig) -> Result<CpuSnapshot, CollectError> {
    let mut sys = System::new_with_specifics(
        RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()),
    );
    let interval = Duration::from_millis(config.cpu_sample_interval_ms)
        .max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    std::thread::sleep(interval);
    sys.refresh_cpu_all();

    let cpus = sys.cpus();
    let first = cpus
        .first()
        .ok_or_else(|| CollectError::Native("no CPUs reported".into()))?;
    let cpu_per_core: Vec<f64> = cpus
        .iter()
        .map(|c| round_to(f64::from(c.cpu_usage()), 1).clamp(0.0, 100.0))
        .collect();

    // sysinfo only reports the current clock; bounds come from the local cpufreq files.
    Ok(CpuSnapshot {
        cpu_count: cpu_per_core.len(),
        cpu_per_core,
        cpu_freq_current: round_to(first.frequency() as f64, 2),
        cpu_freq_min: read_cpu0_freq_mhz(&config.sys_root, "scaling_min_freq"),
        cpu_freq_max: read_cpu0_freq_mhz(&config.sys_root, "scaling_max_freq"),
    })
}

pub fn native_memory() -> Result<MemorySnapshot, CollectError> {
    let sys = System::new_with_specifics(
        RefreshKind::nothing().with_memory(MemoryRefreshKind::everything()),
    );
    let total = sys.total_memory();
    if total == 0 {
        return Err(CollectError::Native("total memory reported as 0".into()));
    }
    let used = sys.used_memory();
    let swap_total = sys.total_swap();
    let swap_used = sys.used_swap();
    Ok(MemorySnapshot {
        memory_total: total,
        memory_available: sys.available_memory(),
        memory_used: used,
        memory_percent: ratio_percent(used, total),
        swap_total,
        swap_used,
        swap_free: sys.free_swap(),
        swap_percent: ratio_percent(swap_used, swap_total),
    })
}

pub fn native_disk() -> Result<DiskSnapshot, CollectError> {
    let disks = Disks::new_with_refreshed_list();
    let disks = disks
        .list()
        .iter()
        .filter(|d| !d.file_system().is_empty())
        .filter_map(|d| {
            let total = d.total_space();
            let mountpoint = d.mount_point().to_string_lossy().into_owned();
            if total == 0 {
                // Unreadable or empty media (e.g. optical drives) report zero capacity.
                tracing::debug!(mountpoint = %mountpoint, "skipping partition without usage");
                return None;
            }
            let free = d.available_space().min(total);
            let used = total - free;
            Some(DiskPartitionSnapshot {
                device: d.name().to_string_lossy().into_owned(),
                mountpoint,
                fstype: d.file_system().to_string_lossy().into_owned(),
                total,
                used,
                free,
                percent: round_to(ratio_percent(used, total), 1),
            })
        })
        .collect();
    Ok(DiskSnapshot { disks })
}

/// Counters as aggregated by sysinfo over every interface it reports.
pub fn native_network() -> Result<NetworkSnapshot, CollectError> {
    let networks = Networks::new_with_refreshed_list();
    Ok(networks
        .list()
        .values()
        .fold(NetworkSnapshot::default(), |mut acc, data| {
            acc.bytes_recv = acc.bytes_recv.saturating_add(data.total_received());
            acc.bytes_sent = acc.bytes_sent.saturating_add(data.total_transmitted());
            acc.packets_recv = acc.packets_recv.saturating_add(data.total_packets_received());
            acc.packets_sent = acc.packets_sent.saturating_add(data.total_packets_transmitted());
            acc
        }))
}

fn ratio_percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
