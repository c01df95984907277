use std::path::PathBuf;

/// Failure of one collection path for one metric.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {what}: {detail}")]
    Parse { what: &'static str, detail: String },
    #[error("statvfs {}: {source}", path.display())]
    Statvfs {
        path: PathBuf,
        #[source]
        source: nix::errno::Errno,
    },
    #[error("native: {0}")]
    Native(String),
}

impl CollectError {
    pub(crate) fn parse(what: &'static str, detail: impl Into<String>) -> Self {
        CollectError::Parse {
            what,
            detail: detail.into(),
        }
    }
}
