//! Index configuration.
//!
//! The core has few knobs: everything about durability, batching, and
//! transaction isolation belongs to the external store, not this crate.

use serde::{Deserialize, Serialize};

/// Configuration for row decoding and the object pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Verify the row's CRC-32 on every decode. Disabling this trades
    /// corruption detection for decode throughput; the length-coherence
    /// check always runs regardless of this flag.
    pub verify_checksum: bool,

    /// Reject terms longer than this many bytes during analysis, surfacing
    /// `EncodeError`. `None` means no limit.
    pub max_term_bytes: Option<usize>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            verify_checksum: true,
            max_term_bytes: Some(32 * 1024),
        }
    }
}

impl IndexConfig {
    /// Checksum verification on, no term-length guard. Matches `Default`
    /// except for the explicit naming; use in production paths.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Skips checksum verification on decode. Use only when a caller has
    /// already validated the row through another channel (e.g. replaying a
    /// write-ahead log it trusts) and wants to avoid paying for the CRC
    /// twice.
    pub fn trusting() -> Self {
        Self {
            verify_checksum: false,
            max_term_bytes: None,
        }
    }

    /// Fast, unguarded configuration for tests: no checksum verification,
    /// no term-length limit.
    pub fn for_testing() -> Self {
        Self {
            verify_checksum: false,
            max_term_bytes: None,
        }
    }
}
