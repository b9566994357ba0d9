//! Trigger-event model
//!
//! Events arrive in one of two shapes: a raw wire event carrying typed field
//! values, or a pre-resolved event exposing an already-materialized document
//! snapshot with an existence flag. The shape is detected once here, at the
//! boundary; everything downstream only ever sees a plain `Document`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::parser::{is_raw_event, parse_document};
use crate::types::{document_from_json, Document, RawDocument};

/// Raw wire event as delivered by the document-database trigger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    /// Current document state
    pub value: Option<RawDocument>,
    /// Previous document state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<RawDocument>,
    /// Fields touched by the update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_mask: Option<Value>,
    /// Trigger invocation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Materialized document snapshot inside a pre-resolved event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolvedSnapshot {
    /// Whether the document exists at this point of the change
    #[serde(default)]
    pub exists: bool,
    /// The document's fields as plain JSON, when it exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, Value>>,
}

/// Before/after change pair of a pre-resolved event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolvedChange {
    /// Post-update snapshot; drives deletion detection
    pub after: ResolvedSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<ResolvedSnapshot>,
}

/// What an event says about the document after the update
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    /// The document's current contents
    Document(Document),
    /// The document no longer exists; the pipeline must no-op
    Deleted,
}

/// Tagged union over the two supported trigger shapes
#[derive(Debug, Clone)]
pub enum TriggerEvent {
    /// Raw wire event with typed field values
    Raw(RawEvent),
    /// Pre-resolved event with materialized snapshots
    Resolved(ResolvedChange),
}

impl TriggerEvent {
    /// Decode a trigger payload, detecting its shape structurally.
    ///
    /// Payloads matching neither shape are an `Error::Event`.
    pub fn from_json(event: &Value) -> Result<TriggerEvent> {
        if is_raw_event(event) {
            let raw: RawEvent = serde_json::from_value(event.clone()).map_err(|e| Error::Event {
                message: format!("malformed raw event: {e}"),
            })?;
            return Ok(TriggerEvent::Raw(raw));
        }

        if let Some(data) = event.get("data") {
            let change: ResolvedChange =
                serde_json::from_value(data.clone()).map_err(|e| Error::Event {
                    message: format!("malformed pre-resolved event: {e}"),
                })?;
            return Ok(TriggerEvent::Resolved(change));
        }

        Err(Error::Event {
            message: "invalid event format: missing document data".to_string(),
        })
    }

    /// Materialize the post-update snapshot this event describes.
    pub fn snapshot(&self) -> Snapshot {
        match self {
            TriggerEvent::Raw(event) => {
                let document = event
                    .value
                    .as_ref()
                    .map(parse_document)
                    .unwrap_or_default();
                Snapshot::Document(document)
            }
            TriggerEvent::Resolved(change) => {
                if !change.after.exists {
                    return Snapshot::Deleted;
                }
                let document = change
                    .after
                    .data
                    .clone()
                    .map(document_from_json)
                    .unwrap_or_default();
                Snapshot::Document(document)
            }
        }
    }
}
