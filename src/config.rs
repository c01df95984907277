use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    /// Origins allowed to call the API with credentials (browser dashboard).
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_port() -> u16 {
    8000
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5173".into()]
}

/// Where the collector looks for kernel pseudo-files.
///
/// When `host_proc_root` exists (a host procfs bind-mounted into a container),
/// metrics are parsed from `host_proc_root` / `host_sys_root`; otherwise the
/// native library path is used.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    #[serde(default = "default_host_proc_root")]
    pub host_proc_root: PathBuf,
    #[serde(default = "default_host_sys_root")]
    pub host_sys_root: PathBuf,
    /// Root reported for native mode. Native collection goes through sysinfo
    /// and reads nothing under it.
    #[serde(default = "default_proc_root")]
    pub proc_root: PathBuf,
    /// Native-mode sysfs root; only the cpufreq bounds are read from it.
    #[serde(default = "default_sys_root")]
    pub sys_root: PathBuf,
    /// Sampling window of the native per-core CPU measurement (blocks the caller).
    #[serde(default = "default_cpu_sample_interval_ms")]
    pub cpu_sample_interval_ms: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            host_proc_root: default_host_proc_root(),
            host_sys_root: default_host_sys_root(),
            proc_root: default_proc_root(),
            sys_root: default_sys_root(),
            cpu_sample_interval_ms: default_cpu_sample_interval_ms(),
        }
    }
}

fn default_host_proc_root() -> PathBuf {
    PathBuf::from("/host/proc")
}

fn default_host_sys_root() -> PathBuf {
    PathBuf::from("/host/sys")
}

fn default_proc_root() -> PathBuf {
    PathBuf::from("/proc")
}

fn default_sys_root() -> PathBuf {
    PathBuf::from("/sys")
}

fn default_cpu_sample_interval_ms() -> u64 {
    1000
}

impl AppConfig {
    /// Reads `CONFIG_FILE` (default `config.toml`). A missing default file means built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_path(&path),
            Err(_) => {
                let path = "config.toml";
                if std::path::Path::new(path).exists() {
                    Self::load_from_path(path)
                } else {
                    tracing::info!("No config.toml found, using defaults");
                    let config = Self::default();
                    config.validate()?;
                    Ok(config)
                }
            }
        }
    }

    fn load_from_path(path: &str) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.host.is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            self.collector.cpu_sample_interval_ms > 0,
            "collector.cpu_sample_interval_ms must be > 0, got {}",
            self.collector.cpu_sample_interval_ms
        );
        for (key, path) in [
            ("collector.host_proc_root", &self.collector.host_proc_root),
            ("collector.host_sys_root", &self.collector.host_sys_root),
            ("collector.proc_root", &self.collector.proc_root),
            ("collector.sys_root", &self.collector.sys_root),
        ] {
            anyhow::ensure!(!path.as_os_str().is_empty(), "{} must be non-empty", key);
        }
        Ok(())
    }
}
