//! Recursive projection of documents through field mappings
//!
//! The engine is total over its domain: it never fails for missing or
//! malformed document data. Absent values degrade to the declared fallback
//! or null, and validation of the result belongs to the remote API.
//!
//! Copyright (c) 2025 Subrelay Team
//! Licensed under the Apache-2.0 license

use std::collections::HashMap;

use crate::mapping::config::{FieldMapping, MappingConfiguration};
use crate::types::{Document, FieldValue, MappedSubscriber};

/// Resolve a dot-notation path against a document.
///
/// Walks nested maps one segment at a time, short-circuiting to `None` the
/// moment the current value is not a map or lacks the requested key. The
/// empty path resolves to `None` immediately.
pub fn resolve_path<'a>(document: &'a Document, path: &str) -> Option<&'a FieldValue> {
    if path.is_empty() {
        return None;
    }

    let mut segments = path.split('.');
    let mut current = document.get(segments.next()?)?;
    for segment in segments {
        current = current.as_map()?.get(segment)?;
    }
    Some(current)
}

/// Map a single field according to its configuration.
///
/// `object` mappings build their output recursively. Child lookups always
/// resolve against the top-level document, never against a sub-document at
/// the mapping's own `sourcePath`: nested rules use absolute paths, and an
/// `object` rule's `sourcePath` does not narrow its children.
///
/// Scalar mappings resolve their `sourcePath`; a null or absent result is
/// replaced by the declared fallback (or null), and anything else is
/// returned unchanged with no further coercion.
pub fn map_field(document: &Document, mapping: &FieldMapping) -> FieldValue {
    match mapping {
        FieldMapping::Object { children, .. } => {
            let mut output = HashMap::with_capacity(children.len());
            for child in children {
                output.insert(child.target_name().to_string(), map_field(document, child));
            }
            FieldValue::Map(output)
        }
        FieldMapping::Text {
            source_path,
            fallback,
            ..
        } => resolve_scalar(
            document,
            source_path,
            fallback.as_ref().map(|s| FieldValue::String(s.clone())),
        ),
        FieldMapping::Number {
            source_path,
            fallback,
            ..
        } => {
            let fallback = fallback.as_ref().map(|n| match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(0.0)),
            });
            resolve_scalar(document, source_path, fallback)
        }
        FieldMapping::Boolean {
            source_path,
            fallback,
            ..
        } => resolve_scalar(document, source_path, fallback.map(FieldValue::Bool)),
    }
}

fn resolve_scalar(document: &Document, path: &str, fallback: Option<FieldValue>) -> FieldValue {
    match resolve_path(document, path) {
        Some(value) if !value.is_null() => value.clone(),
        _ => fallback.unwrap_or(FieldValue::Null),
    }
}

/// Project a document into the fixed subscriber record shape.
///
/// Applies `map_field` to each of the five configuration slots. Performs no
/// validation of its own; invalid or missing upstream data simply surfaces
/// as null fields in the output.
pub fn map_subscriber(
    document: &Document,
    configuration: &MappingConfiguration,
) -> MappedSubscriber {
    MappedSubscriber {
        external_id: map_field(document, &configuration.external_id),
        name: map_field(document, &configuration.name),
        email: map_field(document, &configuration.email),
        phone: map_field(document, &configuration.phone),
        metadata: map_field(document, &configuration.metadata),
    }
}
