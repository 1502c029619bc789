//! In-memory container/object storage for cloudbox.
//!
//! This crate implements the storage registry behind a cloud-style blob API:
//! named containers holding named objects, the rules that keep them
//! consistent, and aggregate usage metadata. Nothing is persisted; payload
//! bytes are never kept, only sizes and attributes.
//!
//! # Storage Backends
//!
//! All backends implement the [`StorageDriver`] trait:
//!
//! - [`InMemoryStorageDriver`] -- `BTreeMap`-based registry for tests and embedding
//!
//! # Design Rules
//!
//! 1. Container names are unique; creating a taken name fails.
//! 2. A container is deleted only when empty. Deletes never cascade.
//! 3. Object uploads overwrite any object of the same name (last write wins).
//! 4. Containers and objects refer to their owners by name. Every operation
//!    re-resolves names, so stale values fail with a not-found error.
//! 5. Name comparisons are exact and case-sensitive.
//! 6. Every failure is returned to the caller; nothing is retried or swallowed.

pub mod config;
pub mod download;
pub mod error;
pub mod handle;
pub mod memory;
pub mod source;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use cloudbox_types::{Container, Extra, MetaData, Object, UsageMetadata};
pub use config::{DriverConfig, DEFAULT_CHUNK_SIZE, DEFAULT_PROVIDER_NAME};
pub use download::ObjectStream;
pub use error::{StorageError, StorageResult};
pub use handle::ContainerHandle;
pub use memory::InMemoryStorageDriver;
pub use source::{probe_file_size, DataSource, SyntheticStream};
pub use traits::StorageDriver;
