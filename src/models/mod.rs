// Snapshot models returned by the collector and serialized by the HTTP layer

mod metric;
mod network;
mod storage;
mod system;

pub use metric::Metric;
pub use network::NetworkSnapshot;
pub use storage::{DiskPartitionSnapshot, DiskSnapshot};
pub use system::{CpuSnapshot, MemorySnapshot, SystemSnapshot};
