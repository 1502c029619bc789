use std::fmt;

use serde::{Deserialize, Serialize};

use crate::extra::{extract_meta_data, Extra, MetaData};

/// A single stored item.
///
/// Objects are owned by exactly one container. The owner is recorded by
/// name at creation time and resolved back through the registry on use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Object {
    /// Name, unique within the owning container.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Content digest, when the provider computes one.
    pub hash: Option<String>,
    /// Provider-specific attributes as supplied at upload.
    pub extra: Extra,
    /// User metadata extracted from `extra["meta_data"]`.
    pub meta_data: MetaData,
    /// Name of the owning container.
    pub container: String,
    /// Display name of the driver that minted this object.
    pub provider: String,
}

impl Object {
    /// Build an object with no hash, deriving `meta_data` from `extra`.
    pub fn new(
        name: impl Into<String>,
        size: u64,
        extra: Extra,
        container: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        let meta_data = extract_meta_data(&extra);
        Self {
            name: name.into(),
            size,
            hash: None,
            extra,
            meta_data,
            container: container.into(),
            provider: provider.into(),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Object: name={}, size={}, hash={}, provider={}>",
            self.name,
            self.size,
            self.hash.as_deref().unwrap_or("None"),
            self.provider
        )
    }
}
