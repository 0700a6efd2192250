//! The transactional key-value boundary this crate consumes.
//!
//! The shard's real store owns transaction isolation, durability, and
//! physical layout; this crate only needs `get`/`put` against one keyspace
//! per property. [`Bucket`] is that boundary. [`MemoryBucket`] is a
//! reference implementation used by this crate's own tests and by callers
//! wiring up a quick fixture — it is not a production store.

use crate::error::{IndexError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;

/// One property's keyspace: term bytes -> row bytes.
pub trait Bucket {
    /// Fetch the row stored under `key`, or `None` if no row exists yet.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous row.
    fn put(&self, key: &[u8], value: Vec<u8>) -> Result<()>;
}

/// In-memory [`Bucket`] backed by a `parking_lot::RwLock<HashMap>`.
///
/// Safe to share across threads; every operation takes its own lock guard,
/// so it provides no transaction isolation beyond last-write-wins.
#[derive(Default)]
pub struct MemoryBucket {
    rows: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored, including rows with `doc_count = 0`.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl Bucket for MemoryBucket {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.rows.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: Vec<u8>) -> Result<()> {
        self.rows.write().insert(key.to_vec(), value);
        Ok(())
    }
}

/// A named collection of [`MemoryBucket`]s, one per property, standing in
/// for the store's `bucket_for(property_name)` lookup.
#[derive(Default)]
pub struct MemoryBucketSet {
    buckets: HashMap<String, MemoryBucket>,
}

impl MemoryBucketSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocate a bucket for `property`. Buckets are created up front,
    /// the same way the real store preallocates one bucket per schema
    /// property rather than lazily on first write.
    pub fn declare(&mut self, property: impl Into<String>) -> &mut Self {
        self.buckets.entry(property.into()).or_default();
        self
    }

    pub fn get(&self, property: &str) -> Option<&dyn Bucket> {
        self.buckets.get(property).map(|b| b as &dyn Bucket)
    }

    pub fn memory_bucket(&self, property: &str) -> Option<&MemoryBucket> {
        self.buckets.get(property)
    }
}

/// Convenience for `Bucket` implementors: wrap a store-native error as
/// `IndexError::StoreError` without losing its message.
pub fn map_store_error<E: std::fmt::Display>(err: E) -> IndexError {
    IndexError::StoreError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_is_none() {
        let bucket = MemoryBucket::new();
        assert_eq!(bucket.get(b"k").unwrap(), None);
    }

    #[test]
    fn put_then_get_roundtrips() {
        let bucket = MemoryBucket::new();
        bucket.put(b"k", vec![1, 2, 3]).unwrap();
        assert_eq!(bucket.get(b"k").unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn bucket_set_declares_and_resolves() {
        let mut set = MemoryBucketSet::new();
        set.declare("title").declare("age");

        assert!(set.get("title").is_some());
        assert!(set.get("age").is_some());
        assert!(set.get("missing").is_none());
    }

    #[derive(Debug)]
    struct DiskFull;

    impl std::fmt::Display for DiskFull {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "disk full")
        }
    }

    struct FailingBucket;

    impl Bucket for FailingBucket {
        fn get(&self, _key: &[u8]) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }

        fn put(&self, _key: &[u8], _value: Vec<u8>) -> Result<()> {
            Err(map_store_error(DiskFull))
        }
    }

    #[test]
    fn map_store_error_preserves_message() {
        let bucket = FailingBucket;
        let err = bucket.put(b"k", vec![1]).unwrap_err();
        match err {
            IndexError::StoreError(message) => assert_eq!(message, "disk full"),
            other => panic!("expected StoreError, got {other:?}"),
        }
    }
}
