// Collection mode: host-mounted procfs/sysfs tree or the native library

use std::path::{Path, PathBuf};

use crate::config::CollectorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Parse kernel text files under a bind-mounted host root, falling back to native.
    Host,
    /// Query the OS through `sysinfo` only.
    Native,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoots {
    pub proc_root: PathBuf,
    pub sys_root: PathBuf,
    pub mode: Mode,
}

impl SourceRoots {
    /// Roots for an explicitly chosen mode, bypassing the filesystem probe.
    pub fn for_mode(config: &CollectorConfig, mode: Mode) -> Self {
        match mode {
            Mode::Host => Self {
                proc_root: config.host_proc_root.clone(),
                sys_root: config.host_sys_root.clone(),
                mode,
            },
            Mode::Native => Self {
                proc_root: config.proc_root.clone(),
                sys_root: config.sys_root.clone(),
                mode,
            },
        }
    }
}

pub fn host_root_present(host_proc_root: &Path) -> bool {
    host_proc_root.exists()
}

/// Probes for the host-mounted proc directory. Re-evaluated on every call.
pub fn resolve_roots(config: &CollectorConfig) -> SourceRoots {
    let mode = if host_root_present(&config.host_proc_root) {
        Mode::Host
    } else {
        Mode::Native
    };
    SourceRoots::for_mode(config, mode)
}
