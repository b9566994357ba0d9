//! Mapping-configuration schema, parsing, and validation
//!
//! The configuration is a JSON document with five mandatory slots, each a
//! `FieldMapping` rule. It is conventionally sourced from the process
//! environment and parsed once per invocation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Maximum nesting depth of `object` mappings.
///
/// serde builds a tree, so configuration cycles are unrepresentable, but an
/// adversarially deep tree would otherwise drive unbounded recursion in the
/// engine. Deeper configurations fail at parse time.
pub const MAX_MAPPING_DEPTH: usize = 32;

/// Names of the mandatory configuration slots, in output order.
const REQUIRED_SLOTS: [&str; 5] = ["externalId", "name", "email", "phone", "metadata"];

/// A single field-mapping rule, discriminated by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldMapping {
    /// Copy a text field
    #[serde(rename_all = "camelCase")]
    Text {
        source_path: String,
        target_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback: Option<String>,
    },
    /// Copy a numeric field
    #[serde(rename_all = "camelCase")]
    Number {
        source_path: String,
        target_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback: Option<serde_json::Number>,
    },
    /// Copy a boolean field
    #[serde(rename_all = "camelCase")]
    Boolean {
        source_path: String,
        target_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback: Option<bool>,
    },
    /// Build a nested composite value from child mappings
    ///
    /// `source_path` is optional here and does not scope the children; child
    /// lookups always resolve against the root document.
    #[serde(rename_all = "camelCase")]
    Object {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source_path: Option<String>,
        target_name: String,
        #[serde(default)]
        children: Vec<FieldMapping>,
    },
}

impl FieldMapping {
    /// Target field name in the output record.
    pub fn target_name(&self) -> &str {
        match self {
            FieldMapping::Text { target_name, .. }
            | FieldMapping::Number { target_name, .. }
            | FieldMapping::Boolean { target_name, .. }
            | FieldMapping::Object { target_name, .. } => target_name,
        }
    }

    /// Source path, when the rule declares one.
    pub fn source_path(&self) -> Option<&str> {
        match self {
            FieldMapping::Text { source_path, .. }
            | FieldMapping::Number { source_path, .. }
            | FieldMapping::Boolean { source_path, .. } => Some(source_path),
            FieldMapping::Object { source_path, .. } => source_path.as_deref(),
        }
    }
}

/// The five mandatory mapping slots of a subscriber configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingConfiguration {
    pub external_id: FieldMapping,
    pub name: FieldMapping,
    pub email: FieldMapping,
    pub phone: FieldMapping,
    pub metadata: FieldMapping,
}

impl MappingConfiguration {
    /// The five slots paired with their configuration names.
    pub fn slots(&self) -> [(&'static str, &FieldMapping); 5] {
        [
            ("externalId", &self.external_id),
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("metadata", &self.metadata),
        ]
    }
}

/// Parse and validate a JSON mapping configuration.
///
/// Failures are configuration errors with distinguishable messages: syntax
/// problems name the JSON error, missing slots name the slots, and schema
/// problems name the offending rule. Callers rely on the distinction to
/// produce actionable diagnostics.
pub fn parse_configuration(json_text: &str) -> Result<MappingConfiguration> {
    let parsed: Value = serde_json::from_str(json_text).map_err(|e| Error::Configuration {
        message: format!("invalid JSON in mapping configuration: {e}"),
        source: Some(anyhow::Error::new(e)),
    })?;

    let missing: Vec<&str> = REQUIRED_SLOTS
        .iter()
        .copied()
        .filter(|slot| parsed.get(slot).map_or(true, Value::is_null))
        .collect();
    if !missing.is_empty() {
        return Err(Error::Configuration {
            message: format!(
                "mapping configuration missing required fields: {}",
                missing.join(", ")
            ),
            source: None,
        });
    }

    let configuration: MappingConfiguration =
        serde_json::from_value(parsed).map_err(|e| Error::Configuration {
            message: format!("invalid mapping configuration schema: {e}"),
            source: Some(anyhow::Error::new(e)),
        })?;

    validate_tree(&configuration)?;
    Ok(configuration)
}

fn validate_tree(configuration: &MappingConfiguration) -> Result<()> {
    for (slot, mapping) in configuration.slots() {
        validate_mapping(slot, mapping, 1)?;
    }
    Ok(())
}

fn validate_mapping(slot: &str, mapping: &FieldMapping, depth: usize) -> Result<()> {
    if depth > MAX_MAPPING_DEPTH {
        return Err(Error::Configuration {
            message: format!(
                "mapping for '{slot}' exceeds the maximum nesting depth of {MAX_MAPPING_DEPTH}"
            ),
            source: None,
        });
    }

    match mapping {
        FieldMapping::Object { children, .. } => {
            for child in children {
                validate_mapping(slot, child, depth + 1)?;
            }
        }
        _ => {
            if mapping.source_path().map_or(true, str::is_empty) {
                return Err(Error::Configuration {
                    message: format!(
                        "mapping for '{slot}' has an empty sourcePath (target '{}')",
                        mapping.target_name()
                    ),
                    source: None,
                });
            }
        }
    }
    Ok(())
}
