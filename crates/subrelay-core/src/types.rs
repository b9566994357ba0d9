//! Core value and record types for the Subrelay bridge
//!
//! This module defines the dynamic value model used throughout the library:
//! the native `FieldValue` produced by decoding, the raw wire-format shapes
//! trigger events arrive in, and the fixed projection output handed to the
//! subscriber API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A dynamically-typed native value as it exists after decoding
///
/// Serializes to plain JSON; timestamps render as RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Timestamp(DateTime<Utc>),
    Array(Vec<FieldValue>),
    Map(HashMap<String, FieldValue>),
}

/// A parsed document: field names to native values
///
/// Transient, built per invocation, never shared across invocations.
pub type Document = HashMap<String, FieldValue>;

impl FieldValue {
    /// True for the `Null` variant.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Borrow the inner map for `Map` values.
    pub fn as_map(&self) -> Option<&HashMap<String, FieldValue>> {
        match self {
            FieldValue::Map(fields) => Some(fields),
            _ => None,
        }
    }

    /// Borrow the inner string for `String` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Value> for FieldValue {
    /// Convert pre-resolved JSON into a native value.
    ///
    /// Pre-resolved events carry plain JSON, so timestamps stay strings here;
    /// only the wire-format decoder produces `Timestamp` values.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(0.0)),
            },
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => {
                FieldValue::Array(items.into_iter().map(FieldValue::from).collect())
            }
            Value::Object(fields) => FieldValue::Map(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, FieldValue::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Build a document from a pre-resolved JSON object.
pub fn document_from_json(fields: serde_json::Map<String, Value>) -> Document {
    fields
        .into_iter()
        .map(|(key, value)| (key, FieldValue::from(value)))
        .collect()
}

/// A tagged field value as received in raw event form
///
/// Exactly one tag is populated per instance in well-formed wire input. The
/// decoder trusts the first non-absent tag in a fixed priority order rather
/// than enforcing the invariant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFieldValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    /// Integer payloads arrive as base-10 text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integer_value: Option<String>,
    /// Double payloads arrive as text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub double_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
    /// RFC 3339 date-time text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_value: Option<String>,
    /// The payload itself is typically JSON null; presence alone marks the tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_value: Option<RawArrayValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_value: Option<RawMapValue>,
}

/// Payload of an `arrayValue` tag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawArrayValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<RawFieldValue>>,
}

/// Payload of a `mapValue` tag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMapValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, RawFieldValue>>,
}

/// A raw document as carried inside a wire-format trigger event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    /// Document path in the source database
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Document fields with typed values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, RawFieldValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

/// Projection result shaped for the subscriber API
///
/// Missing upstream data surfaces as JSON null fields; judging them is the
/// remote API's responsibility, not this record's.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedSubscriber {
    pub external_id: FieldValue,
    pub name: FieldValue,
    pub email: FieldValue,
    pub phone: FieldValue,
    pub metadata: FieldValue,
}
