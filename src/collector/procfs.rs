// Host-rooted collection: parse kernel text files under a (possibly bind-mounted) proc/sys tree.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::error::CollectError;
use super::roots::SourceRoots;
use super::round_to;
use crate::models::{
    CpuSnapshot, DiskPartitionSnapshot, DiskSnapshot, MemorySnapshot, NetworkSnapshot,
};

/// Filesystem types backed by kernel memory, never reported as disks.
pub const VIRTUAL_FS_TYPES: &[&str] = &[
    "proc", "sysfs", "devtmpfs", "devpts", "tmpfs", "cgroup", "cgroup2",
];

/// Interface name prefixes of container bridges and veth pairs.
const VIRTUAL_IFACE_PREFIXES: &[&str] = &["docker", "veth"];

fn read(path: PathBuf) -> Result<String, CollectError> {
    std::fs::read_to_string(&path).map_err(|source| CollectError::Io { path, source })
}

// --- CPU ---

/// Scheduler counters of one core from `/proc/stat`, in clock ticks since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoreTicks {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
}

impl CoreTicks {
    pub fn busy(&self) -> u64 {
        [self.nice, self.system, self.irq, self.softirq]
            .iter()
            .fold(self.user, |acc, v| acc.saturating_add(*v))
    }

    pub fn total(&self) -> u64 {
        self.busy()
            .saturating_add(self.idle)
            .saturating_add(self.iowait)
    }

    fn checked_total(&self) -> Option<u64> {
        [
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
        ]
        .iter()
        .try_fold(self.user, |acc, v| acc.checked_add(*v))
    }

    /// Busy share of all ticks since boot, one decimal.
    ///
    /// Single sample: this is an average over the whole uptime, not the
    /// current rate the native path reports.
    pub fn utilization(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        round_to(self.busy() as f64 / total as f64 * 100.0, 1)
    }
}

/// Per-core counters from `/proc/stat` content. The leading aggregate `cpu` line is dropped.
pub fn parse_cpu_lines(content: &str) -> Result<Vec<CoreTicks>, CollectError> {
    let cores: Vec<CoreTicks> = content
        .lines()
        .filter(|line| {
            line.split_whitespace()
                .next()
                .is_some_and(|tok| tok.starts_with("cpu"))
        })
        .skip(1)
        .map(parse_core_line)
        .collect::<Result<_, _>>()?;
    if cores.is_empty() {
        return Err(CollectError::parse("stat", "no per-core cpu lines"));
    }
    Ok(cores)
}

fn parse_core_line(line: &str) -> Result<CoreTicks, CollectError> {
    let values: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .take(7)
        .map(|v| {
            v.parse()
                .map_err(|_| CollectError::parse("stat", format!("invalid counter {:?}", v)))
        })
        .collect::<Result<_, _>>()?;
    if values.len() < 7 {
        return Err(CollectError::parse(
            "stat",
            format!("expected 7 counters, got {} in {:?}", values.len(), line),
        ));
    }
    let ticks = CoreTicks {
        user: values[0],
        nice: values[1],
        system: values[2],
        idle: values[3],
        iowait: values[4],
        irq: values[5],
        softirq: values[6],
    };
    if ticks.checked_total().is_none() {
        return Err(CollectError::parse(
            "stat",
            format!("counter sum overflows in {:?}", line),
        ));
    }
    Ok(ticks)
}

/// Reads a core-0 cpufreq file (kHz) and returns MHz rounded to 2 decimals; 0 when unavailable.
pub fn read_cpu0_freq_mhz(sys_root: &Path, file: &str) -> f64 {
    let path = sys_root.join("devices/system/cpu/cpu0/cpufreq").join(file);
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .map(|khz| round_to(khz / 1000.0, 2))
        .unwrap_or(0.0)
}

pub fn host_cpu(roots: &SourceRoots) -> Result<CpuSnapshot, CollectError> {
    let content = read(roots.proc_root.join("stat"))?;
    let cores = parse_cpu_lines(&content)?;
    Ok(CpuSnapshot {
        cpu_per_core: cores.iter().map(CoreTicks::utilization).collect(),
        cpu_freq_current: read_cpu0_freq_mhz(&roots.sys_root, "scaling_cur_freq"),
        cpu_freq_min: read_cpu0_freq_mhz(&roots.sys_root, "scaling_min_freq"),
        cpu_freq_max: read_cpu0_freq_mhz(&roots.sys_root, "scaling_max_freq"),
        cpu_count: cores.len(),
    })
}

// --- Memory ---

/// `/proc/meminfo` as key -> bytes. `kB` values are taken as 1024 bytes.
pub fn parse_meminfo(content: &str) -> Result<HashMap<String, u64>, CollectError> {
    let mut fields = HashMap::new();
    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let mut parts = rest.split_whitespace();
        let Some(raw) = parts.next() else {
            continue;
        };
        let value: u64 = raw
            .parse()
            .map_err(|_| CollectError::parse("meminfo", format!("invalid value for {}", key)))?;
        let bytes = match parts.next() {
            Some("kB") => value.checked_mul(1024).ok_or_else(|| {
                CollectError::parse("meminfo", format!("value for {} overflows", key))
            })?,
            _ => value,
        };
        fields.insert(key.trim().to_string(), bytes);
    }
    Ok(fields)
}

/// Derives usage from meminfo fields.
///
/// `available` is estimated as free + buffers + cached rather than the
/// kernel's own MemAvailable.
pub fn memory_from_meminfo(fields: &HashMap<String, u64>) -> MemorySnapshot {
    let get = |key: &str| fields.get(key).copied().unwrap_or(0);
    let total = get("MemTotal");
    let available = get("MemFree")
        .saturating_add(get("Buffers"))
        .saturating_add(get("Cached"));
    let used = total.saturating_sub(available);
    let swap_total = get("SwapTotal");
    let swap_free = get("SwapFree");
    let swap_used = swap_total.saturating_sub(swap_free);
    MemorySnapshot {
        memory_total: total,
        memory_available: available,
        memory_used: used,
        memory_percent: percent(used, total),
        swap_total,
        swap_used,
        swap_free,
        swap_percent: percent(swap_used, swap_total),
    }
}

pub fn host_memory(roots: &SourceRoots) -> Result<MemorySnapshot, CollectError> {
    let content = read(roots.proc_root.join("meminfo"))?;
    Ok(memory_from_meminfo(&parse_meminfo(&content)?))
}

// --- Disk ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
}

/// Mount table entries backed by real storage. Short lines and virtual filesystems are skipped.
pub fn parse_mounts(content: &str) -> Vec<MountEntry> {
    content
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 6 || VIRTUAL_FS_TYPES.contains(&fields[2]) {
                return None;
            }
            Some(MountEntry {
                device: unescape_mount_field(fields[0]),
                mountpoint: unescape_mount_field(fields[1]),
                fstype: fields[2].to_string(),
            })
        })
        .collect()
}

/// Decodes the octal escapes (`\040` etc.) the kernel writes for whitespace in mount fields.
fn unescape_mount_field(field: &str) -> String {
    if !field.contains('\\') {
        return field.to_string();
    }
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\'
            && let Some(digits) = bytes.get(i + 1..i + 4)
            && digits.iter().all(|d| (b'0'..=b'7').contains(d))
        {
            let code = digits.iter().fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
            out.push(code as u8);
            i += 4;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Usage of one mount from its statvfs block counts.
pub fn partition_usage(
    entry: &MountEntry,
    blocks: u64,
    block_size: u64,
    free_blocks: u64,
) -> DiskPartitionSnapshot {
    let total = blocks.saturating_mul(block_size);
    let free = free_blocks.saturating_mul(block_size).min(total);
    let used = total.saturating_sub(free);
    DiskPartitionSnapshot {
        device: entry.device.clone(),
        mountpoint: entry.mountpoint.clone(),
        fstype: entry.fstype.clone(),
        total,
        used,
        free,
        percent: percent(used, total),
    }
}

fn statvfs_usage(entry: &MountEntry) -> Result<DiskPartitionSnapshot, CollectError> {
    let path = PathBuf::from(&entry.mountpoint);
    let st = nix::sys::statvfs::statvfs(path.as_path())
        .map_err(|source| CollectError::Statvfs { path, source })?;
    // `blocks` and `blocks_free` are counted in fragment-size units.
    Ok(partition_usage(
        entry,
        st.blocks() as u64,
        st.fragment_size() as u64,
        st.blocks_free() as u64,
    ))
}

pub fn host_disk(roots: &SourceRoots) -> Result<DiskSnapshot, CollectError> {
    let content = read(roots.proc_root.join("mounts"))?;
    let disks = parse_mounts(&content)
        .iter()
        .filter_map(|entry| match statvfs_usage(entry) {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::debug!(mountpoint = %entry.mountpoint, error = %e, "skipping mount");
                None
            }
        })
        .collect();
    Ok(DiskSnapshot { disks })
}

// --- Network ---

fn is_virtual_iface(name: &str) -> bool {
    name == "lo" || VIRTUAL_IFACE_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Sums `/proc/net/dev` counters over physical interfaces. Malformed interface lines are skipped.
pub fn parse_net_dev(content: &str) -> NetworkSnapshot {
    let mut totals = NetworkSnapshot::default();
    for line in content.lines().skip(2) {
        let Some((name, counters)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if is_virtual_iface(name) {
            continue;
        }
        let values: Result<Vec<u64>, _> = counters
            .split_whitespace()
            .take(10)
            .map(str::parse)
            .collect();
        match values {
            Ok(v) if v.len() == 10 => {
                totals.bytes_recv = totals.bytes_recv.saturating_add(v[0]);
                totals.packets_recv = totals.packets_recv.saturating_add(v[1]);
                totals.bytes_sent = totals.bytes_sent.saturating_add(v[8]);
                totals.packets_sent = totals.packets_sent.saturating_add(v[9]);
            }
            _ => tracing::debug!(iface = name, "skipping malformed net/dev line"),
        }
    }
    totals
}

pub fn host_network(roots: &SourceRoots) -> Result<NetworkSnapshot, CollectError> {
    let content = read(roots.proc_root.join("net/dev"))?;
    Ok(parse_net_dev(&content))
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(part as f64 / total as f64 * 100.0, 1)
}
