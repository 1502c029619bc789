use std::path::PathBuf;

/// Errors from storage driver operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No container is registered under this name.
    #[error("container not found: {name}")]
    ContainerNotFound { name: String },

    /// A container with this name is already registered.
    #[error("container already exists: {name}")]
    ContainerAlreadyExists { name: String },

    /// The container still holds objects and cannot be deleted.
    #[error("container is not empty: {name}")]
    ContainerNotEmpty { name: String },

    /// The container exists but holds no object under this name.
    #[error("object not found: {container}/{name}")]
    ObjectNotFound { container: String, name: String },

    /// A local file could not be probed, read, or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Download target exists and overwriting was not requested.
    #[error("destination already exists: {}", .path.display())]
    DestinationExists { path: PathBuf },

    /// A generated stream's total length does not fit in a `u64`.
    #[error("stream size overflows: {chunk_count} chunks of {chunk_len} bytes")]
    SizeOverflow { chunk_count: usize, chunk_len: usize },

    /// The registry lock was poisoned by a panicking writer.
    #[error("registry lock poisoned: {0}")]
    LockPoisoned(String),

    /// Driver configuration is malformed or out of range.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl StorageError {
    pub(crate) fn container_not_found(name: &str) -> Self {
        Self::ContainerNotFound {
            name: name.to_string(),
        }
    }

    pub(crate) fn object_not_found(container: &str, name: &str) -> Self {
        Self::ObjectNotFound {
            container: container.to_string(),
            name: name.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_offending_names() {
        let e = StorageError::container_not_found("photos");
        assert_eq!(e.to_string(), "container not found: photos");

        let e = StorageError::object_not_found("photos", "cat.png");
        assert_eq!(e.to_string(), "object not found: photos/cat.png");

        let e = StorageError::ContainerNotEmpty { name: "logs".into() };
        assert_eq!(e.to_string(), "container is not empty: logs");

        let e = StorageError::SizeOverflow { chunk_count: 3, chunk_len: 4 };
        assert_eq!(e.to_string(), "stream size overflows: 3 chunks of 4 bytes");
    }

    #[test]
    fn io_error_mentions_path_and_keeps_source() {
        use std::error::Error as _;

        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e = StorageError::io("/tmp/missing.bin", inner);
        assert!(e.to_string().contains("/tmp/missing.bin"));
        assert!(e.source().is_some());
    }
}
