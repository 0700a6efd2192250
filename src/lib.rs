//! Per-shard inverted index core.
//!
//! This crate owns two tightly coupled responsibilities of a schema-aware
//! object store's shard: turning a typed property value into indexable
//! terms ([`analyzer`]), and maintaining the checksum-protected posting-list
//! rows those terms live in ([`index`]). Everything else — the
//! transactional key-value store, schema resolution, object identity and
//! serialization, and query evaluation — is an external collaborator this
//! crate only talks to through the [`storage::Bucket`] trait and the typed
//! inputs of [`pipeline::index_object`] / [`pipeline::deindex_object`].

pub mod config;
pub mod error;
pub mod index;
pub mod storage;
pub mod types;

pub use config::IndexConfig;
pub use error::{IndexError, Result};
pub use index::{analyzer, mutator, pipeline, row_codec, scalar_codec};
pub use storage::{Bucket, MemoryBucket};
pub use types::{Countable, Property, PropertyKind, PropertySpec, PropertyValue};
