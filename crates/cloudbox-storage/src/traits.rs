use std::path::Path;

use cloudbox_types::{Container, Extra, Object, UsageMetadata};

use crate::download::{save_stream, ObjectStream};
use crate::error::StorageResult;
use crate::handle::ContainerHandle;
use crate::source::DataSource;

/// A container/object storage provider.
///
/// All implementations must satisfy these invariants:
/// - Container names are unique. Creating a registered name fails with
///   `ContainerAlreadyExists` and leaves the registry untouched.
/// - A container holding objects cannot be deleted (`ContainerNotEmpty`).
///   Deletion never cascades.
/// - Uploading under an existing object name replaces that object.
/// - Containers and objects passed in are resolved again by name, so stale
///   values fail with `ContainerNotFound` / `ObjectNotFound`.
/// - Errors are returned to the caller, never silently ignored.
pub trait StorageDriver: Send + Sync {
    /// Display name of the provider.
    fn name(&self) -> &str;

    /// Container count, total object count, and total bytes stored.
    fn get_meta_data(&self) -> StorageResult<UsageMetadata>;

    /// Snapshot of every registered container.
    fn list_containers(&self) -> StorageResult<Vec<Container>>;

    /// Snapshot of the objects in `container`.
    fn list_container_objects(&self, container: &Container) -> StorageResult<Vec<Object>>;

    /// Look up a container by name.
    fn get_container(&self, container_name: &str) -> StorageResult<Container>;

    /// Look up an object. The container is resolved first, so a missing
    /// container reports `ContainerNotFound` rather than `ObjectNotFound`.
    fn get_object(&self, container_name: &str, object_name: &str) -> StorageResult<Object>;

    /// Register a new, empty container.
    fn create_container(&self, container_name: &str) -> StorageResult<Container>;

    /// Remove an empty container.
    fn delete_container(&self, container: &Container) -> StorageResult<()>;

    /// Store an object sized from the regular file at `file_path`.
    ///
    /// Only the file's length is read; its bytes are not.
    fn upload_object(
        &self,
        file_path: &Path,
        container: &Container,
        object_name: &str,
        extra: Option<Extra>,
    ) -> StorageResult<Object>;

    /// Store an object sized from the source's declared length.
    fn upload_object_via_stream(
        &self,
        source: &dyn DataSource,
        container: &Container,
        object_name: &str,
        extra: Option<Extra>,
    ) -> StorageResult<Object>;

    /// Remove an object from its container.
    fn delete_object(&self, object: &Object) -> StorageResult<()>;

    /// Open a stream over the object's body.
    ///
    /// `chunk_size` of `None` uses the driver's configured default.
    fn download_object_as_stream(
        &self,
        object: &Object,
        chunk_size: Option<usize>,
    ) -> StorageResult<ObjectStream>;

    /// Write the object's body to `destination`.
    ///
    /// Fails with `DestinationExists` if the path exists and
    /// `overwrite_existing` is false. When writing fails part-way and
    /// `delete_on_failure` is set, the partial file is removed.
    fn download_object(
        &self,
        object: &Object,
        destination: &Path,
        overwrite_existing: bool,
        delete_on_failure: bool,
    ) -> StorageResult<()> {
        let stream = self.download_object_as_stream(object, None)?;
        save_stream(stream, destination, overwrite_existing, delete_on_failure)?;
        Ok(())
    }

    /// Borrow a handle that dispatches container-scoped operations.
    fn container(&self, container_name: &str) -> StorageResult<ContainerHandle<'_>>
    where
        Self: Sized,
    {
        ContainerHandle::open(self, container_name)
    }
}
