//! Insert and delete document ids within a posting-list row, preserving
//! row invariants.
//!
//! Both operations always go through a clean decode -> mutate -> encode
//! round trip via [`Row`]; there is no in-place byte patching of the
//! stored `doc_count` field, which would silently desync once the layout
//! assumptions it depends on stop holding.

use super::row_codec::{entry_width, Row, RowEntry};
use crate::config::IndexConfig;
use crate::error::{describe_term, IndexError, Result};
use crate::storage::Bucket;

/// Load `term`'s row from `bucket`, decoding it for a property whose
/// frequency mode is `has_frequency`. An absent key decodes to the empty
/// row.
fn load(
    bucket: &dyn Bucket,
    property: &str,
    term: &[u8],
    has_frequency: bool,
    config: &IndexConfig,
) -> Result<Row> {
    match bucket.get(term)? {
        Some(bytes) => Row::decode(&bytes, has_frequency, config.verify_checksum, property, term),
        None => Ok(Row::empty()),
    }
}

fn store(
    bucket: &dyn Bucket,
    property: &str,
    term: &[u8],
    row: &Row,
    has_frequency: bool,
) -> Result<()> {
    let encoded = row.encode(has_frequency);
    let width = entry_width(has_frequency);
    if (encoded.len() - 8) % width != 0 {
        return Err(IndexError::CorruptRow {
            property: property.to_string(),
            term: describe_term(term),
            reason: format!(
                "encoded row length {} is not 8 + a multiple of {}",
                encoded.len(),
                width
            ),
        });
    }
    bucket.put(term, encoded)
}

/// Append `doc_id` (and, for frequency-mode rows, `term_frequency`) to
/// `term`'s row. Does not deduplicate: inserting the same `(term, doc_id)`
/// twice yields two entries — callers updating an existing object must
/// delete before re-inserting.
pub fn insert(
    bucket: &dyn Bucket,
    property: &str,
    term: &[u8],
    doc_id: u32,
    term_frequency: f32,
    has_frequency: bool,
    config: &IndexConfig,
) -> Result<()> {
    let mut row = load(bucket, property, term, has_frequency, config)?;
    let entry = if has_frequency {
        RowEntry::with_frequency(doc_id, term_frequency)
    } else {
        RowEntry::no_frequency(doc_id)
    };
    row.entries.push(entry);
    store(bucket, property, term, &row, has_frequency)
}

/// Remove every entry for `doc_id` from `term`'s row. Idempotent: deleting
/// a doc id that is not present leaves `doc_count` unchanged but still
/// rewrites the row.
pub fn delete(
    bucket: &dyn Bucket,
    property: &str,
    term: &[u8],
    doc_id: u32,
    has_frequency: bool,
    config: &IndexConfig,
) -> Result<()> {
    let stored = bucket.get(term)?;
    let row = match &stored {
        None => return Ok(()),
        Some(bytes) => Row::decode(bytes, has_frequency, config.verify_checksum, property, term)?,
    };

    let filtered = Row {
        entries: row
            .entries
            .into_iter()
            .filter(|e| e.doc_id != doc_id)
            .collect(),
    };
    store(bucket, property, term, &filtered, has_frequency)
}
