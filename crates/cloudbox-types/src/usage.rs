use serde::{Deserialize, Serialize};

/// Aggregate usage across every container in a registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Number of containers.
    pub container_count: u64,
    /// Number of objects across all containers.
    pub object_count: u64,
    /// Sum of all object sizes in bytes.
    pub bytes_used: u64,
}

impl UsageMetadata {
    pub const fn new(container_count: u64, object_count: u64, bytes_used: u64) -> Self {
        Self {
            container_count,
            object_count,
            bytes_used,
        }
    }
}
