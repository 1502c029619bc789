//! Free-form attribute maps attached to containers and objects.
//!
//! `Extra` mirrors the provider-specific attribute bag of a cloud storage
//! API; values are arbitrary JSON. `MetaData` is the user metadata subset,
//! always string-to-string.

use std::collections::BTreeMap;

use serde_json::Value;

/// Provider-specific attributes of a container or object.
pub type Extra = BTreeMap<String, Value>;

/// User metadata of an object.
pub type MetaData = BTreeMap<String, String>;

/// Key under which an upload's `extra` carries user metadata.
pub const META_DATA_KEY: &str = "meta_data";

/// Key of the object-count hint stamped on newly created containers.
pub const OBJECT_COUNT_KEY: &str = "object_count";

/// Pull user metadata out of an `extra` map.
///
/// Reads `extra["meta_data"]` when it is a JSON object. String values are
/// kept verbatim; any other value is rendered as its JSON text. A missing
/// key or a non-object value yields empty metadata.
pub fn extract_meta_data(extra: &Extra) -> MetaData {
    match extra.get(META_DATA_KEY) {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| {
                let rendered = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), rendered)
            })
            .collect(),
        _ => MetaData::new(),
    }
}
