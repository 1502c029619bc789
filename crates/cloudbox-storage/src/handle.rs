use std::path::Path;

use cloudbox_types::{Container, Extra, Object};

use crate::download::ObjectStream;
use crate::error::StorageResult;
use crate::source::DataSource;
use crate::traits::StorageDriver;

/// Handle to one container of a driver.
///
/// The handle keeps only the container's name and resolves it through the
/// driver on every call. Once the container is deleted, every operation on
/// the handle fails with `ContainerNotFound`.
#[derive(Clone)]
pub struct ContainerHandle<'a> {
    driver: &'a dyn StorageDriver,
    name: String,
}

impl<'a> ContainerHandle<'a> {
    /// Open a handle, failing with `ContainerNotFound` if the name is unknown.
    pub fn open(driver: &'a dyn StorageDriver, container_name: &str) -> StorageResult<Self> {
        let container = driver.get_container(container_name)?;
        Ok(Self {
            driver,
            name: container.name,
        })
    }

    /// Name of the container this handle resolves.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current registry snapshot of the container.
    pub fn container(&self) -> StorageResult<Container> {
        self.driver.get_container(&self.name)
    }

    pub fn list_objects(&self) -> StorageResult<Vec<Object>> {
        let container = self.container()?;
        self.driver.list_container_objects(&container)
    }

    pub fn get_object(&self, object_name: &str) -> StorageResult<Object> {
        self.driver.get_object(&self.name, object_name)
    }

    pub fn upload_object(
        &self,
        file_path: &Path,
        object_name: &str,
        extra: Option<Extra>,
    ) -> StorageResult<Object> {
        let container = self.container()?;
        self.driver.upload_object(file_path, &container, object_name, extra)
    }

    pub fn upload_object_via_stream(
        &self,
        source: &dyn DataSource,
        object_name: &str,
        extra: Option<Extra>,
    ) -> StorageResult<Object> {
        let container = self.container()?;
        self.driver.upload_object_via_stream(source, &container, object_name, extra)
    }

    /// Delete the named object from this container.
    pub fn delete_object(&self, object_name: &str) -> StorageResult<()> {
        let object = self.get_object(object_name)?;
        self.driver.delete_object(&object)
    }

    pub fn download_object_as_stream(
        &self,
        object_name: &str,
        chunk_size: Option<usize>,
    ) -> StorageResult<ObjectStream> {
        let object = self.get_object(object_name)?;
        self.driver.download_object_as_stream(&object, chunk_size)
    }

    /// Delete the container itself. It must be empty.
    pub fn delete(&self) -> StorageResult<()> {
        let container = self.container()?;
        self.driver.delete_container(&container)
    }
}

impl std::fmt::Debug for ContainerHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerHandle")
            .field("provider", &self.driver.name())
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::StorageError;
    use crate::memory::InMemoryStorageDriver;
    use crate::source::SyntheticStream;
    use crate::traits::StorageDriver;

    #[test]
    fn open_unknown_container_fails() {
        let driver = InMemoryStorageDriver::new();
        assert!(matches!(
            driver.container("missing"),
            Err(StorageError::ContainerNotFound { .. })
        ));
    }

    #[test]
    fn handle_dispatches_through_driver() {
        let driver = InMemoryStorageDriver::new();
        driver.create_container("test container 1").unwrap();
        let handle = driver.container("test container 1").unwrap();
        assert_eq!(handle.name(), "test container 1");

        let obj = handle
            .upload_object_via_stream(&SyntheticStream::new(5, 10), "test object", None)
            .unwrap();
        assert_eq!(obj.size, 50);
        assert_eq!(handle.list_objects().unwrap().len(), 1);
        assert_eq!(handle.get_object("test object").unwrap(), obj);

        let body: usize = handle
            .download_object_as_stream("test object", Some(8))
            .unwrap()
            .map(|c| c.len())
            .sum();
        assert_eq!(body, 50);

        handle.delete_object("test object").unwrap();
        assert!(handle.list_objects().unwrap().is_empty());
    }

    #[test]
    fn handle_delete_respects_non_empty_guard() {
        let driver = InMemoryStorageDriver::new();
        driver.create_container("c1").unwrap();
        let handle = driver.container("c1").unwrap();
        handle.upload_object_via_stream(&"abc", "o1", None).unwrap();

        assert!(matches!(
            handle.delete(),
            Err(StorageError::ContainerNotEmpty { .. })
        ));
        handle.delete_object("o1").unwrap();
        handle.delete().unwrap();
    }

    #[test]
    fn handle_to_deleted_container_goes_stale() {
        let driver = InMemoryStorageDriver::new();
        driver.create_container("c1").unwrap();
        let handle = driver.container("c1").unwrap();
        handle.delete().unwrap();

        assert!(matches!(
            handle.list_objects(),
            Err(StorageError::ContainerNotFound { .. })
        ));
        assert!(matches!(
            handle.upload_object_via_stream(&"abc", "o1", None),
            Err(StorageError::ContainerNotFound { .. })
        ));
        assert_eq!(driver.get_meta_data().unwrap().object_count, 0);
    }

    #[test]
    fn handle_file_upload_reports_missing_path() {
        let driver = InMemoryStorageDriver::new();
        driver.create_container("c1").unwrap();
        let handle = driver.container("c1").unwrap();
        let dir = tempfile::tempdir().unwrap();

        let err = handle
            .upload_object(&dir.path().join("inexistent.file"), "test", None)
            .unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
