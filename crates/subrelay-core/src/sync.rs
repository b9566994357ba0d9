//! Event-processing pipeline
//!
//! Ties the event model, mapping engine, and subscriber client together into
//! the single entry point the invocation boundary calls, and folds the
//! outcome into the structured response the hosting platform expects.
//!
//! Copyright (c) 2025 Subrelay Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::SubscriberClient;
use crate::config::BridgeConfig;
use crate::error::{Error, Result};
use crate::event::{Snapshot, TriggerEvent};
use crate::mapping::{map_subscriber, parse_configuration};

/// Outcome of a successfully processed trigger event
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The subscriber record was forwarded and accepted
    Updated { message: String },
    /// The event required no action
    Skipped { reason: String },
}

/// Result payload of a successful invocation
#[derive(Debug, Clone, Serialize)]
pub struct SyncResult {
    pub message: String,
}

/// Structured response handed back to the hosting platform
///
/// Never a fault: configuration and transport errors fold into
/// `{ success: false, error }`.
#[derive(Debug, Clone, Serialize)]
pub struct SyncResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SyncResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncResponse {
    /// Fold a pipeline result into the boundary's wire shape.
    pub fn from_result(result: Result<SyncOutcome>) -> Self {
        match result {
            Ok(SyncOutcome::Updated { message }) | Ok(SyncOutcome::Skipped { reason: message }) => {
                Self {
                    success: true,
                    result: Some(SyncResult { message }),
                    error: None,
                }
            }
            Err(error) => Self::failure(error.to_string()),
        }
    }

    /// A failure response with the given message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(message.into()),
        }
    }
}

/// Process one trigger event end to end.
///
/// Decodes the event, short-circuits deletions with a no-op success, parses
/// the mapping configuration, projects the document, and forwards the result
/// through the client. The pipeline never retries; callers may wrap it in
/// their own timeout or retry policy.
pub async fn process_event(
    event: &Value,
    config: &BridgeConfig,
    client: &SubscriberClient,
) -> Result<SyncOutcome> {
    info!("processing subscriber update");

    let event = TriggerEvent::from_json(event)?;
    let document = match event.snapshot() {
        Snapshot::Deleted => {
            info!("document was deleted, skipping update");
            return Ok(SyncOutcome::Skipped {
                reason: "document deleted, no action needed".to_string(),
            });
        }
        Snapshot::Document(document) => document,
    };

    if document.is_empty() {
        return Err(Error::Event {
            message: "no document data in event".to_string(),
        });
    }
    debug!(fields = document.len(), "document parsed");

    let configuration = parse_configuration(&config.mapping_json)?;
    let subscriber = map_subscriber(&document, &configuration);
    debug!("document mapped to subscriber record");

    let message = client.update_subscriber(&subscriber).await?;
    info!("subscriber updated");

    Ok(SyncOutcome::Updated { message })
}
