use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use cloudbox_types::{Container, Extra, Object, UsageMetadata};
use tracing::{debug, info};

use crate::config::DriverConfig;
use crate::download::ObjectStream;
use crate::error::{StorageError, StorageResult};
use crate::source::{probe_file_size, DataSource};
use crate::traits::StorageDriver;

/// A registered container together with the objects it owns.
#[derive(Debug)]
struct ContainerEntry {
    container: Container,
    objects: BTreeMap<String, Object>,
}

type Registry = BTreeMap<String, ContainerEntry>;

/// In-memory, `BTreeMap`-based storage driver.
///
/// Intended for tests and embedding. The whole registry sits behind one
/// `RwLock`: mutations take the write lock and reads take the read lock, so
/// every call sees a consistent snapshot. Values are cloned out on read.
/// Listings come back ordered by name.
pub struct InMemoryStorageDriver {
    config: DriverConfig,
    containers: RwLock<Registry>,
}

impl InMemoryStorageDriver {
    /// Create an empty driver with the default configuration.
    pub fn new() -> Self {
        Self::build(DriverConfig::default())
    }

    /// Create an empty driver with `config`, rejecting invalid values.
    pub fn with_config(config: DriverConfig) -> StorageResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: DriverConfig) -> Self {
        info!(provider = %config.provider_name, "storage driver initialized");
        Self {
            config,
            containers: RwLock::new(BTreeMap::new()),
        }
    }

    /// Configuration the driver was built with.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Number of registered containers.
    pub fn len(&self) -> StorageResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns `true` if no container is registered.
    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Registry>> {
        self.containers
            .read()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Registry>> {
        self.containers
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))
    }

    /// Insert an object of `size` bytes, replacing any same-named object.
    fn add_object(
        &self,
        container: &Container,
        object_name: &str,
        size: u64,
        extra: Option<Extra>,
    ) -> StorageResult<Object> {
        let mut registry = self.write()?;
        let entry = registry
            .get_mut(&container.name)
            .ok_or_else(|| StorageError::container_not_found(&container.name))?;

        let object = Object::new(
            object_name,
            size,
            extra.unwrap_or_default(),
            container.name.as_str(),
            self.config.provider_name.as_str(),
        );
        let replaced = entry
            .objects
            .insert(object_name.to_string(), object.clone())
            .is_some();
        debug!(
            container = %container.name,
            object = %object_name,
            size,
            replaced,
            "object stored"
        );
        Ok(object)
    }
}

/// Resolve a container entry, failing with `ContainerNotFound`.
fn entry<'a>(registry: &'a Registry, name: &str) -> StorageResult<&'a ContainerEntry> {
    registry
        .get(name)
        .ok_or_else(|| StorageError::container_not_found(name))
}

impl Default for InMemoryStorageDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageDriver for InMemoryStorageDriver {
    fn name(&self) -> &str {
        &self.config.provider_name
    }

    fn get_meta_data(&self) -> StorageResult<UsageMetadata> {
        let registry = self.read()?;
        let mut usage = UsageMetadata {
            container_count: registry.len() as u64,
            ..UsageMetadata::default()
        };
        for entry in registry.values() {
            usage.object_count = usage.object_count.saturating_add(entry.objects.len() as u64);
            usage.bytes_used = entry
                .objects
                .values()
                .fold(usage.bytes_used, |acc, o| acc.saturating_add(o.size));
        }
        Ok(usage)
    }

    fn list_containers(&self) -> StorageResult<Vec<Container>> {
        let registry = self.read()?;
        Ok(registry.values().map(|e| e.container.clone()).collect())
    }

    fn list_container_objects(&self, container: &Container) -> StorageResult<Vec<Object>> {
        let registry = self.read()?;
        let entry = entry(&registry, &container.name)?;
        Ok(entry.objects.values().cloned().collect())
    }

    fn get_container(&self, container_name: &str) -> StorageResult<Container> {
        let registry = self.read()?;
        Ok(entry(&registry, container_name)?.container.clone())
    }

    fn get_object(&self, container_name: &str, object_name: &str) -> StorageResult<Object> {
        let registry = self.read()?;
        entry(&registry, container_name)?
            .objects
            .get(object_name)
            .cloned()
            .ok_or_else(|| StorageError::object_not_found(container_name, object_name))
    }

    fn create_container(&self, container_name: &str) -> StorageResult<Container> {
        let mut registry = self.write()?;
        if registry.contains_key(container_name) {
            return Err(StorageError::ContainerAlreadyExists {
                name: container_name.to_string(),
            });
        }
        let container = Container::empty(container_name, self.config.provider_name.as_str());
        registry.insert(
            container_name.to_string(),
            ContainerEntry {
                container: container.clone(),
                objects: BTreeMap::new(),
            },
        );
        debug!(container = %container_name, "container created");
        Ok(container)
    }

    fn delete_container(&self, container: &Container) -> StorageResult<()> {
        let mut registry = self.write()?;
        let entry = entry(&registry, &container.name)?;
        if !entry.objects.is_empty() {
            return Err(StorageError::ContainerNotEmpty {
                name: container.name.clone(),
            });
        }
        registry.remove(&container.name);
        debug!(container = %container.name, "container deleted");
        Ok(())
    }

    fn upload_object(
        &self,
        file_path: &Path,
        container: &Container,
        object_name: &str,
        extra: Option<Extra>,
    ) -> StorageResult<Object> {
        let size = probe_file_size(file_path)?;
        self.add_object(container, object_name, size, extra)
    }

    fn upload_object_via_stream(
        &self,
        source: &dyn DataSource,
        container: &Container,
        object_name: &str,
        extra: Option<Extra>,
    ) -> StorageResult<Object> {
        self.add_object(container, object_name, source.declared_len(), extra)
    }

    fn delete_object(&self, object: &Object) -> StorageResult<()> {
        let mut registry = self.write()?;
        let entry = registry
            .get_mut(&object.container)
            .ok_or_else(|| StorageError::container_not_found(&object.container))?;
        if entry.objects.remove(&object.name).is_none() {
            return Err(StorageError::object_not_found(&object.container, &object.name));
        }
        debug!(container = %object.container, object = %object.name, "object deleted");
        Ok(())
    }

    fn download_object_as_stream(
        &self,
        object: &Object,
        chunk_size: Option<usize>,
    ) -> StorageResult<ObjectStream> {
        // Size comes from the registry, not from the caller's copy.
        let current = self.get_object(&object.container, &object.name)?;
        let chunk_size = chunk_size
            .filter(|&n| n > 0)
            .unwrap_or(self.config.download_chunk_size);
        Ok(ObjectStream::new(
            &current.container,
            &current.name,
            current.size,
            chunk_size,
        ))
    }
}

impl std::fmt::Debug for InMemoryStorageDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.read().map(|r| r.len()).unwrap_or_default();
        f.debug_struct("InMemoryStorageDriver")
            .field("provider", &self.config.provider_name)
            .field("container_count", &count)
            .finish()
    }
}
