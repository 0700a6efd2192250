//! Ties analysis and row mutation to one object: given a schema-resolved
//! property list and an object's property map, analyze it and apply the
//! resulting mutations to the appropriate per-property bucket.

use super::{analyzer, mutator};
use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::storage::{Bucket, MemoryBucketSet};
use crate::types::{DocId, PropertyMap, PropertySpec};

/// Resolves a property name to its backing bucket, standing in for the
/// store's `bucket_for(property_name)` lookup.
pub trait BucketResolver {
    fn bucket_for(&self, property: &str) -> Option<&dyn Bucket>;
}

impl BucketResolver for MemoryBucketSet {
    fn bucket_for(&self, property: &str) -> Option<&dyn Bucket> {
        self.get(property)
    }
}

/// Analyze `values` against `property_specs` and apply an insert for every
/// resulting `(property, term)` pair, in schema property order followed by
/// analyzer item order.
pub fn index_object(
    resolver: &dyn BucketResolver,
    doc_id: DocId,
    property_specs: &[PropertySpec],
    values: &PropertyMap,
    config: &IndexConfig,
) -> Result<()> {
    let properties = analyzer::object(property_specs, values, config)?;

    for property in &properties {
        let bucket = resolver.bucket_for(&property.name).ok_or_else(|| {
            IndexError::MissingBucket {
                property: property.name.clone(),
            }
        })?;

        if property.has_frequency {
            for item in &property.items {
                mutator::insert(
                    bucket,
                    &property.name,
                    &item.data,
                    doc_id,
                    item.term_frequency,
                    true,
                    config,
                )?;
            }
        } else {
            if property.items.len() != 1 {
                return Err(IndexError::SchemaMismatch {
                    property: property.name.clone(),
                    reason: format!(
                        "non-frequency property produced {} items, expected exactly 1",
                        property.items.len()
                    ),
                });
            }
            let item = &property.items[0];
            mutator::insert(
                bucket,
                &property.name,
                &item.data,
                doc_id,
                0.0,
                false,
                config,
            )?;
        }
    }

    Ok(())
}

/// Symmetric to [`index_object`]: removes `doc_id` from every row the
/// object's analyzed properties touch.
pub fn deindex_object(
    resolver: &dyn BucketResolver,
    doc_id: DocId,
    property_specs: &[PropertySpec],
    values: &PropertyMap,
    config: &IndexConfig,
) -> Result<()> {
    let properties = analyzer::object(property_specs, values, config)?;

    for property in &properties {
        let bucket = resolver.bucket_for(&property.name).ok_or_else(|| {
            IndexError::MissingBucket {
                property: property.name.clone(),
            }
        })?;

        if !property.has_frequency && property.items.len() != 1 {
            return Err(IndexError::SchemaMismatch {
                property: property.name.clone(),
                reason: format!(
                    "non-frequency property produced {} items, expected exactly 1",
                    property.items.len()
                ),
            });
        }

        for item in &property.items {
            mutator::delete(
                bucket,
                &property.name,
                &item.data,
                doc_id,
                property.has_frequency,
                config,
            )?;
        }
    }

    Ok(())
}
