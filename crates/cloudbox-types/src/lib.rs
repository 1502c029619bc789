//! Value types for the cloudbox storage registry.
//!
//! This crate holds the plain data handed across the storage API. It has no
//! behavior beyond construction and formatting; every lifecycle rule lives in
//! `cloudbox-storage`.
//!
//! # Key Types
//!
//! - [`Container`] -- a named collection of objects
//! - [`Object`] -- a single stored item, owned by exactly one container
//! - [`UsageMetadata`] -- aggregate counts and bytes across the registry
//! - [`Extra`] / [`MetaData`] -- free-form attribute maps

pub mod container;
pub mod extra;
pub mod object;
pub mod usage;

pub use container::Container;
pub use extra::{extract_meta_data, Extra, MetaData, META_DATA_KEY, OBJECT_COUNT_KEY};
pub use object::Object;
pub use usage::UsageMetadata;
