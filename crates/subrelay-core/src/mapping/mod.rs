//! Declarative field-mapping engine
//!
//! Projects a parsed `Document` into the fixed subscriber record shape using
//! a user-supplied `MappingConfiguration`: dot-path lookups, typed fallback
//! values, and recursive nested-object construction.
//!
//! Copyright (c) 2025 Subrelay Team
//! Licensed under the Apache-2.0 license

pub mod config;
pub mod engine;

pub use config::{parse_configuration, FieldMapping, MappingConfiguration, MAX_MAPPING_DEPTH};
pub use engine::{map_field, map_subscriber, resolve_path};
