// Shared test helpers: synthetic host proc/sys trees

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use sysmon::config::CollectorConfig;
use tempfile::TempDir;

pub const STAT: &str = "\
cpu  300 0 100 500 100 0 0 0 0 0
cpu0 100 0 50 200 50 0 0 0 0 0
cpu1 200 0 50 300 50 0 0 0 0 0
intr 12345 0 0
ctxt 99999
";

pub const MEMINFO: &str = "\
MemTotal:       16000 kB
MemFree:         4000 kB
Buffers:         1000 kB
Cached:          3000 kB
SwapTotal:       2000 kB
SwapFree:        1500 kB
";

pub const NET_DEV: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 9000 90 0 0 0 0 0 0 9000 90 0 0 0 0 0 0
  eth0: 1000 10 0 0 0 0 0 0 2000 20 0 0 0 0 0 0
docker0: 111 1 0 0 0 0 0 0 222 2 0 0 0 0 0 0
";

/// A host root under a temp dir: `<tmp>/proc` and `<tmp>/sys`, both empty.
pub struct HostTree {
    pub dir: TempDir,
}

impl HostTree {
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("proc")).unwrap();
        fs::create_dir_all(dir.path().join("sys")).unwrap();
        Self { dir }
    }

    /// Full tree: stat, meminfo, net/dev, cpufreq and a mount table with one
    /// ext4 mount (the temp dir itself) and one tmpfs mount.
    pub fn populated() -> Self {
        let tree = Self::empty();
        tree.write_proc("stat", STAT);
        tree.write_proc("meminfo", MEMINFO);
        tree.write_proc("net/dev", NET_DEV);
        let mounts = format!(
            "/dev/sda1 {} ext4 rw,relatime 0 0\ntmpfs /run tmpfs rw,nosuid 0 0\n",
            tree.dir.path().display()
        );
        tree.write_proc("mounts", &mounts);
        tree.write_sys("devices/system/cpu/cpu0/cpufreq/scaling_cur_freq", "2400000\n");
        tree.write_sys("devices/system/cpu/cpu0/cpufreq/scaling_min_freq", "800000\n");
        tree.write_sys("devices/system/cpu/cpu0/cpufreq/scaling_max_freq", "3200000\n");
        tree
    }

    pub fn proc_root(&self) -> std::path::PathBuf {
        self.dir.path().join("proc")
    }

    pub fn write_proc(&self, rel: &str, content: &str) {
        write(&self.proc_root().join(rel), content);
    }

    pub fn write_sys(&self, rel: &str, content: &str) {
        write(&self.dir.path().join("sys").join(rel), content);
    }

    pub fn config(&self) -> CollectorConfig {
        CollectorConfig {
            host_proc_root: self.proc_root(),
            host_sys_root: self.dir.path().join("sys"),
            cpu_sample_interval_ms: 200,
            ..CollectorConfig::default()
        }
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Collector config whose host root does not exist (native mode).
pub fn native_config() -> CollectorConfig {
    CollectorConfig {
        host_proc_root: "/nonexistent/sysmon-test/proc".into(),
        host_sys_root: "/nonexistent/sysmon-test/sys".into(),
        cpu_sample_interval_ms: 200,
        ..CollectorConfig::default()
    }
}
