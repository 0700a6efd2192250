//! Data model shared between the analyzer, the row mutator, and the
//! object pipeline: [`Countable`]/[`Property`] are the ephemeral output of
//! analysis, [`PropertyValue`]/[`PropertySpec`]/[`PropertyKind`] are the
//! typed stand-ins for the upstream schema and object property map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stable 32-bit identifier for an object within the shard.
pub type DocId = u32;

/// A single indexable token produced by analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Countable {
    /// Opaque key bytes — the term.
    pub data: Vec<u8>,
    /// Meaningful only when the owning [`Property::has_frequency`] is true.
    pub term_frequency: f32,
}

impl Countable {
    /// A countable with no term frequency, for non-text properties.
    pub fn scalar(data: Vec<u8>) -> Self {
        Self {
            data,
            term_frequency: 0.0,
        }
    }

    pub fn with_frequency(data: Vec<u8>, term_frequency: f32) -> Self {
        Self {
            data,
            term_frequency,
        }
    }
}

/// The output of analysis for one named attribute of one object.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// The schema property name; maps 1:1 to a bucket identifier.
    pub name: String,
    /// The analyzed tokens: length 1 for scalar properties, length N for
    /// text properties with N distinct terms.
    pub items: Vec<Countable>,
    /// Whether `items[*].term_frequency` is meaningful.
    pub has_frequency: bool,
}

/// The declared type of a schema property, as resolved from the upstream
/// schema lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    Text,
    String,
    Int,
    Float,
    Bool,
    RefSet,
}

impl PropertyKind {
    /// Whether rows for this property kind carry a term frequency.
    pub fn has_frequency(self) -> bool {
        matches!(self, PropertyKind::Text | PropertyKind::String)
    }
}

/// One declared property of a class, as resolved by the upstream schema
/// lookup (`schema.lookup(class_name) -> property_specs`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub name: String,
    pub kind: PropertyKind,
}

impl PropertySpec {
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A typed property value, standing in for the object's property map.
/// Dispatch in [`crate::index::analyzer::object`] is a static `match` over
/// this enum, so a mismatched property type is a compile error at every
/// call site that constructs one, not a runtime assertion that can be
/// skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    RefSet(Vec<u32>),
}

impl PropertyValue {
    /// The `PropertyKind` this value would satisfy.
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Text(_) => PropertyKind::Text,
            PropertyValue::String(_) => PropertyKind::String,
            PropertyValue::Int(_) => PropertyKind::Int,
            PropertyValue::Float(_) => PropertyKind::Float,
            PropertyValue::Bool(_) => PropertyKind::Bool,
            PropertyValue::RefSet(_) => PropertyKind::RefSet,
        }
    }
}

/// The property map for one object, keyed by property name.
pub type PropertyMap = HashMap<String, PropertyValue>;
