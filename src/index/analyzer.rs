//! Converts typed property values into analyzed [`Countable`] terms, and
//! dispatches a whole object's property map into a list of [`Property`]
//! results.

use super::scalar_codec::{encode_float64, encode_int64, encode_uint32};
use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::types::{Countable, Property, PropertyKind, PropertyMap, PropertySpec, PropertyValue};
use std::collections::HashMap;

/// Tokenize `s` for a text property: split on runs of non-letter,
/// non-digit characters, lowercase, and compute per-term frequency.
pub fn text(s: &str, config: &IndexConfig) -> Result<Vec<Countable>> {
    analyze_tokens(s, |c| !c.is_alphabetic() && !c.is_numeric(), true, config)
}

/// Tokenize `s` for a string property: split on Unicode whitespace only,
/// no lowercasing.
pub fn string(s: &str, config: &IndexConfig) -> Result<Vec<Countable>> {
    analyze_tokens(s, char::is_whitespace, false, config)
}

fn analyze_tokens(
    s: &str,
    is_separator: impl Fn(char) -> bool,
    lowercase: bool,
    config: &IndexConfig,
) -> Result<Vec<Countable>> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    let mut total_tokens: u32 = 0;

    for raw_token in s.split(is_separator) {
        if raw_token.is_empty() {
            continue;
        }
        let token = if lowercase {
            raw_token.to_lowercase()
        } else {
            raw_token.to_string()
        };
        if let Some(limit) = config.max_term_bytes {
            if token.len() > limit {
                return Err(IndexError::EncodeError {
                    reason: format!(
                        "term {:?} is {} bytes, exceeding the configured limit of {}",
                        token,
                        token.len(),
                        limit
                    ),
                });
            }
        }
        *counts.entry(token).or_insert(0) += 1;
        total_tokens += 1;
    }

    if total_tokens == 0 {
        return Ok(Vec::new());
    }

    Ok(counts
        .into_iter()
        .map(|(term, count)| {
            let term_frequency = count as f32 / total_tokens as f32;
            Countable::with_frequency(term.into_bytes(), term_frequency)
        })
        .collect())
}

/// Analyze a single `i64` property value.
pub fn int(x: i64) -> Vec<Countable> {
    vec![Countable::scalar(encode_int64(x).to_vec())]
}

/// Analyze a single `f64` property value. Fails with `EncodeError` on NaN.
pub fn float(x: f64) -> Result<Vec<Countable>> {
    let encoded = encode_float64(x)?;
    Ok(vec![Countable::scalar(encoded.to_vec())])
}

/// Analyze a single boolean property value: one byte, `0x00` or `0x01`.
pub fn bool_value(b: bool) -> Vec<Countable> {
    vec![Countable::scalar(vec![if b { 0x01 } else { 0x00 }])]
}

/// Analyze a reference-set property value: indexes the cardinality of the
/// set, not the referenced objects.
pub fn ref_count(refs: &[u32]) -> Vec<Countable> {
    vec![Countable::scalar(encode_uint32(refs.len() as u32).to_vec())]
}

/// Run analysis for every declared property present in `values`, in the
/// order `property_specs` lists them.
///
/// Properties declared in `property_specs` but absent from `values` are
/// skipped. A value present under a property's name whose variant does not
/// match the declared `PropertyKind` fails with `SchemaMismatch`.
pub fn object(
    property_specs: &[PropertySpec],
    values: &PropertyMap,
    config: &IndexConfig,
) -> Result<Vec<Property>> {
    let mut properties = Vec::with_capacity(property_specs.len());

    for spec in property_specs {
        let Some(value) = values.get(&spec.name) else {
            continue;
        };

        if value.kind() != spec.kind {
            return Err(IndexError::SchemaMismatch {
                property: spec.name.clone(),
                reason: format!(
                    "declared as {:?} but value is {:?}",
                    spec.kind,
                    value.kind()
                ),
            });
        }

        let (items, has_frequency) = analyze_value(value, config)?;
        properties.push(Property {
            name: spec.name.clone(),
            items,
            has_frequency,
        });
    }

    Ok(properties)
}

fn analyze_value(value: &PropertyValue, config: &IndexConfig) -> Result<(Vec<Countable>, bool)> {
    match value {
        PropertyValue::Text(s) => Ok((text(s, config)?, true)),
        PropertyValue::String(s) => Ok((string(s, config)?, true)),
        PropertyValue::Int(x) => Ok((int(*x), false)),
        PropertyValue::Float(x) => Ok((float(*x)?, false)),
        PropertyValue::Bool(b) => Ok((bool_value(*b), false)),
        PropertyValue::RefSet(refs) => Ok((ref_count(refs), false)),
    }
}

/// `PropertyKind::has_frequency` agrees with the analyzer's own dispatch;
/// exposed so the object pipeline does not have to re-derive it.
pub fn has_frequency_for(kind: PropertyKind) -> bool {
    kind.has_frequency()
}
