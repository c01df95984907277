// Per-metric result: the value, or a degraded error payload

use serde::{Deserialize, Serialize};

/// One metric category as emitted on the wire.
///
/// When every collection path failed the metric degrades to `{"error": "..."}`
/// instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric<T> {
    Ok(T),
    Failed { error: String },
}

impl<T> Metric<T> {
    pub fn failed(error: impl Into<String>) -> Self {
        Metric::Failed {
            error: error.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Metric::Ok(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Metric::Ok(v) => Some(v),
            Metric::Failed { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Metric::Ok(v) => Some(v),
            Metric::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Metric::Ok(_) => None,
            Metric::Failed { error } => Some(error),
        }
    }
}
