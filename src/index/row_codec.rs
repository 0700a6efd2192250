//! Posting-list row encode/decode.
//!
//! On-disk format (little-endian throughout):
//!
//! ```text
//! row := crc32(4) || doc_count:u32(4) || entry × doc_count
//! entry (freq)    := doc_id:u32(4) || tf:f32(4)      // width 8
//! entry (no-freq) := doc_id:u32(4)                   // width 4
//! crc32 = CRC-32/IEEE over (doc_count || entries)
//! ```
//!
//! An absent bucket key is not handled here — by convention it decodes, at
//! the call site, to the empty row. This module only ever sees bytes that
//! actually exist.

use crate::error::{describe_term, IndexError, Result};

/// One decoded posting-list entry: a document id and, for frequency-mode
/// rows, its term frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowEntry {
    pub doc_id: u32,
    pub term_frequency: f32,
}

impl RowEntry {
    pub fn no_frequency(doc_id: u32) -> Self {
        Self {
            doc_id,
            term_frequency: 0.0,
        }
    }

    pub fn with_frequency(doc_id: u32, term_frequency: f32) -> Self {
        Self {
            doc_id,
            term_frequency,
        }
    }
}

/// Entry width in bytes for a property's frequency mode.
pub fn entry_width(has_frequency: bool) -> usize {
    if has_frequency {
        8
    } else {
        4
    }
}

/// A decoded row: an ordered list of entries in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub entries: Vec<RowEntry>,
}

impl Row {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode `bytes` as a row for a property whose frequency mode is
    /// `has_frequency`. `verify_checksum` controls whether the stored
    /// CRC-32 is checked against the recomputed value; the length
    /// coherence check always runs.
    ///
    /// `property` and `term` are used only to identify the offending row
    /// in error messages.
    pub fn decode(
        bytes: &[u8],
        has_frequency: bool,
        verify_checksum: bool,
        property: &str,
        term: &[u8],
    ) -> Result<Self> {
        let width = entry_width(has_frequency);

        if bytes.len() < 8 {
            return corrupt(property, term, "row shorter than the 8-byte header");
        }

        let stored_crc = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        let suffix = &bytes[4..];
        let doc_count = u32::from_le_bytes(suffix[0..4].try_into().unwrap()) as usize;
        let payload = &suffix[4..];

        if payload.len() != doc_count * width {
            return corrupt(
                property,
                term,
                &format!(
                    "doc_count={} implies {} payload bytes at width {}, but {} were present",
                    doc_count,
                    doc_count * width,
                    width,
                    payload.len()
                ),
            );
        }

        if verify_checksum {
            let actual_crc = crc32fast::hash(suffix);
            if actual_crc != stored_crc {
                return corrupt(
                    property,
                    term,
                    &format!("checksum mismatch: stored {:#010x}, computed {:#010x}", stored_crc, actual_crc),
                );
            }
        }

        let mut entries = Vec::with_capacity(doc_count);
        for chunk in payload.chunks_exact(width) {
            let doc_id = u32::from_le_bytes(chunk[0..4].try_into().unwrap());
            let term_frequency = if has_frequency {
                f32::from_le_bytes(chunk[4..8].try_into().unwrap())
            } else {
                0.0
            };
            entries.push(RowEntry {
                doc_id,
                term_frequency,
            });
        }

        Ok(Row { entries })
    }

    /// Encode this row. `has_frequency` selects entry width; callers are
    /// responsible for only ever decoding/encoding one property's rows
    /// with a consistent mode.
    pub fn encode(&self, has_frequency: bool) -> Vec<u8> {
        let width = entry_width(has_frequency);
        let mut suffix = Vec::with_capacity(4 + self.entries.len() * width);
        suffix.extend_from_slice(&(self.entries.len() as u32).to_le_bytes());
        for entry in &self.entries {
            suffix.extend_from_slice(&entry.doc_id.to_le_bytes());
            if has_frequency {
                suffix.extend_from_slice(&entry.term_frequency.to_le_bytes());
            }
        }

        let crc = crc32fast::hash(&suffix);
        let mut row = Vec::with_capacity(4 + suffix.len());
        row.extend_from_slice(&crc.to_le_bytes());
        row.extend_from_slice(&suffix);
        row
    }
}

fn corrupt<T>(property: &str, term: &[u8], reason: &str) -> Result<T> {
    Err(IndexError::CorruptRow {
        property: property.to_string(),
        term: describe_term(term),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_no_frequency() {
        let row = Row {
            entries: vec![RowEntry::no_frequency(7), RowEntry::no_frequency(9)],
        };
        let bytes = row.encode(false);
        assert_eq!(bytes.len(), 8 + 2 * 4);
        let decoded = Row::decode(&bytes, false, true, "p", b"t").unwrap();
        assert_eq!(decoded, row);
    }

    #[test]
    fn roundtrip_with_frequency() {
        let row = Row {
            entries: vec![
                RowEntry::with_frequency(7, 0.5),
                RowEntry::with_frequency(9, 0.25),
            ],
        };
        let bytes = row.encode(true);
        assert_eq!(bytes.len(), 8 + 2 * 8);
        let decoded = Row::decode(&bytes, true, true, "p", b"t").unwrap();
        assert_eq!(decoded, row);
    }

    #[test]
    fn checksum_mismatch_detected() {
        let row = Row {
            entries: vec![RowEntry::no_frequency(1)],
        };
        let mut bytes = row.encode(false);
        // Flip a byte in the payload.
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        let err = Row::decode(&bytes, false, true, "p", b"t").unwrap_err();
        assert!(matches!(err, IndexError::CorruptRow { .. }));
    }

    #[test]
    fn checksum_skipped_when_disabled() {
        let row = Row {
            entries: vec![RowEntry::no_frequency(1)],
        };
        let mut bytes = row.encode(false);
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        // Payload length is still coherent, so this decodes even though
        // the doc id is now corrupted data -- that's the cost of disabling
        // verification.
        let decoded = Row::decode(&bytes, false, false, "p", b"t").unwrap();
        assert_ne!(decoded.entries[0].doc_id, 1);
    }

    #[test]
    fn truncated_entry_is_corrupt() {
        let row = Row {
            entries: vec![RowEntry::no_frequency(1)],
        };
        let mut bytes = row.encode(false);
        bytes.pop();
        let err = Row::decode(&bytes, false, true, "p", b"t").unwrap_err();
        assert!(matches!(err, IndexError::CorruptRow { .. }));
    }

    #[test]
    fn header_too_short_is_corrupt() {
        let err = Row::decode(&[0, 1, 2], false, true, "p", b"t").unwrap_err();
        assert!(matches!(err, IndexError::CorruptRow { .. }));
    }

    #[test]
    fn empty_row_encodes_zero_entries() {
        let row = Row::empty();
        let bytes = row.encode(true);
        assert_eq!(bytes.len(), 8);
        let decoded = Row::decode(&bytes, true, true, "p", b"t").unwrap();
        assert!(decoded.entries.is_empty());
    }
}
