//! Subrelay Core - field-mapping bridge between document-update events and
//! the subscriber API
//!
//! This crate normalizes document-update trigger events into plain
//! documents, projects them through a user-supplied declarative field
//! mapping, and forwards the result to the subscriber-management API.
//!
//! # Main Components
//!
//! - **Parser**: decodes raw wire-format field values into native values
//! - **Event Model**: detects the trigger shape once, at the boundary
//! - **Mapping Engine**: dot-path lookups, fallbacks, recursive nested
//!   objects
//! - **Subscriber Client**: authenticated HTTP transport to the remote API
//! - **Pipeline**: the single entry point an invocation boundary calls
//!
//! # Example
//!
//! ```no_run
//! use serde_json::json;
//! use subrelay_core::{process_event, BridgeConfig, SubscriberClient};
//!
//! # async fn example() -> subrelay_core::Result<()> {
//! let config = BridgeConfig::from_env()?;
//! let client = SubscriberClient::new(&config)?;
//!
//! let event = json!({
//!     "value": {"fields": {"name": {"stringValue": "Ann"}}}
//! });
//! let outcome = process_event(&event, &config, &client).await?;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod event;
pub mod mapping;
pub mod parser;
pub mod sync;
pub mod types;

// Re-export main types for convenience
pub use api::{ApiError, FieldError, SubscriberClient};
pub use config::BridgeConfig;
pub use error::{Error, Result};
pub use event::{RawEvent, ResolvedChange, ResolvedSnapshot, Snapshot, TriggerEvent};
pub use mapping::{
    map_field, map_subscriber, parse_configuration, resolve_path, FieldMapping,
    MappingConfiguration,
};
pub use parser::{decode_value, is_raw_event, parse_document};
pub use sync::{process_event, SyncOutcome, SyncResponse, SyncResult};
pub use types::{
    Document, FieldValue, MappedSubscriber, RawArrayValue, RawDocument, RawFieldValue, RawMapValue,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
