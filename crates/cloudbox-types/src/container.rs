use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::extra::{Extra, OBJECT_COUNT_KEY};

/// A named collection of objects.
///
/// A `Container` is a value snapshot. It refers back to its driver only by
/// the `provider` name; every follow-up operation goes through the driver by
/// container `name`, so a snapshot of a deleted container is simply stale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Registry-unique container name.
    pub name: String,
    /// Provider-specific attributes.
    pub extra: Extra,
    /// Display name of the driver that minted this container.
    pub provider: String,
}

impl Container {
    pub fn new(name: impl Into<String>, extra: Extra, provider: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra,
            provider: provider.into(),
        }
    }

    /// A freshly created container: `extra = {"object_count": 0}`.
    pub fn empty(name: impl Into<String>, provider: impl Into<String>) -> Self {
        let mut extra = Extra::new();
        extra.insert(OBJECT_COUNT_KEY.to_string(), Value::from(0u64));
        Self::new(name, extra, provider)
    }

    /// The `object_count` hint from `extra`, if present and numeric.
    pub fn object_count_hint(&self) -> Option<u64> {
        self.extra.get(OBJECT_COUNT_KEY).and_then(Value::as_u64)
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Container: name={}, provider={}>", self.name, self.provider)
    }
}
