//! Raw document parser for wire-format trigger events
//!
//! Trigger events can arrive in raw wire format, where every field carries a
//! typed tag (`stringValue`, `integerValue`, ...) instead of a native value.
//! This module converts tagged values into `FieldValue`s and whole raw
//! documents into flat `Document`s, and hosts the structural test that tells
//! raw events apart from pre-resolved ones.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::types::{Document, FieldValue, RawDocument, RawFieldValue};

/// Convert a single tagged wire value into a native value.
///
/// Tags are checked in a fixed priority order and the first populated one
/// wins; the exactly-one-tag rule is a wire-format invariant this function
/// trusts rather than enforces. Absence of any recognizable tag is not an
/// error and decodes to `FieldValue::Null`.
///
/// Integer and double payloads arrive as text and are coerced here, so that
/// number-typed mapping slots emit numbers without any engine-side coercion.
/// Unparseable numeric or timestamp text degrades to the raw string.
pub fn decode_value(raw: &RawFieldValue) -> FieldValue {
    if let Some(s) = &raw.string_value {
        return FieldValue::String(s.clone());
    }

    if let Some(text) = &raw.integer_value {
        return match text.parse::<i64>() {
            Ok(n) => FieldValue::Integer(n),
            Err(_) => FieldValue::String(text.clone()),
        };
    }

    if let Some(text) = &raw.double_value {
        return match text.parse::<f64>() {
            Ok(n) => FieldValue::Float(n),
            Err(_) => FieldValue::String(text.clone()),
        };
    }

    if let Some(b) = raw.boolean_value {
        return FieldValue::Bool(b);
    }

    if let Some(text) = &raw.timestamp_value {
        return match DateTime::parse_from_rfc3339(text) {
            Ok(ts) => FieldValue::Timestamp(ts.with_timezone(&Utc)),
            Err(_) => FieldValue::String(text.clone()),
        };
    }

    if raw.null_value.is_some() {
        return FieldValue::Null;
    }

    if let Some(array) = &raw.array_value {
        let values = array.values.as_deref().unwrap_or(&[]);
        return FieldValue::Array(values.iter().map(decode_value).collect());
    }

    if let Some(map) = &raw.map_value {
        if let Some(fields) = &map.fields {
            return FieldValue::Map(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), decode_value(value)))
                    .collect(),
            );
        }
    }

    FieldValue::Null
}

/// Convert a raw document into a flat native document.
///
/// A document without `fields` yields an empty document rather than an
/// error. The result is one level deep; nested structure comes from map and
/// array decoding, never from this function.
pub fn parse_document(raw: &RawDocument) -> Document {
    let Some(fields) = &raw.fields else {
        return Document::new();
    };

    fields
        .iter()
        .map(|(key, value)| (key.clone(), decode_value(value)))
        .collect()
}

/// Structural test distinguishing raw wire events from pre-resolved events.
///
/// An event is raw exactly when it is a non-null object with a `value`
/// property that is itself a non-null object containing `fields`. This is
/// the sole discriminator; no other heuristics are applied.
pub fn is_raw_event(event: &Value) -> bool {
    event
        .as_object()
        .and_then(|obj| obj.get("value"))
        .and_then(Value::as_object)
        .map(|value| value.contains_key("fields"))
        .unwrap_or(false)
}
