use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

/// Provider name stamped on containers and objects by default.
pub const DEFAULT_PROVIDER_NAME: &str = "Dummy Storage Provider";

/// Chunk length used by downloads when the caller does not pick one.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Configuration for an in-memory storage driver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Display name of the provider.
    pub provider_name: String,
    /// Default chunk length for download streams. Must be non-zero.
    pub download_chunk_size: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            provider_name: DEFAULT_PROVIDER_NAME.to_string(),
            download_chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl DriverConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> StorageResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| StorageError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> StorageResult<()> {
        if self.download_chunk_size == 0 {
            return Err(StorageError::Config(
                "download_chunk_size must be greater than zero".into(),
            ));
        }
        if self.provider_name.trim().is_empty() {
            return Err(StorageError::Config("provider_name must not be empty".into()));
        }
        Ok(())
    }
}
