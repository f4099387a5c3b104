//! The Unity package manifest (`Packages/manifest.json`).
//!
//! Only `dependencies` and `scopedRegistries` are interpreted. Every other
//! top-level key is kept as-is, in its original position, when the
//! document is written back.

use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{Error, Result};
use crate::ioutils::{strip_bom, write_file};

const DEPENDENCIES_KEY: &str = "dependencies";
const SCOPED_REGISTRIES_KEY: &str = "scopedRegistries";

/// A `scopedRegistries` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopedRegistry {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Keys other than name, url and scopes
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ScopedRegistry {
    pub fn new<N: Into<String>, U: Into<String>>(name: N, url: U) -> Self {
        Self { name: name.into(), url: url.into(), scopes: Vec::new(), extra: IndexMap::new() }
    }

    /// Adds scopes that are not present yet, keeping first-seen order.
    /// Returns how many were added.
    pub fn add_scopes<I, S>(&mut self, scopes: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for scope in scopes {
            let scope = scope.as_ref();
            if !self.scopes.iter().any(|s| s == scope) {
                self.scopes.push(scope.to_string());
                added += 1;
            }
        }
        added
    }
}

/// A parsed manifest document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Manifest {
    pub dependencies: IndexMap<String, String>,
    pub scoped_registries: Vec<ScopedRegistry>,
    /// The full original document, used for pass-through keys and ordering
    fields: Map<String, Value>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a manifest from a JSON value.
    ///
    /// # Errors
    /// * `Error::MalformedManifestDocument` if the root is not an object or
    ///   one of the interpreted keys has the wrong shape
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(fields) = value else {
            return Err(Error::MalformedManifestDocument(
                "the root must be a JSON object".to_string(),
            ));
        };

        let dependencies = match fields.get(DEPENDENCIES_KEY) {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                Error::MalformedManifestDocument(format!("invalid '{}': {}", DEPENDENCIES_KEY, e))
            })?,
            None => IndexMap::new(),
        };

        let scoped_registries = match fields.get(SCOPED_REGISTRIES_KEY) {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                Error::MalformedManifestDocument(format!(
                    "invalid '{}': {}",
                    SCOPED_REGISTRIES_KEY, e
                ))
            })?,
            None => Vec::new(),
        };

        Ok(Self { dependencies, scoped_registries, fields })
    }

    /// Looks up a registry by name.
    pub fn registry_mut(&mut self, name: &str) -> Option<&mut ScopedRegistry> {
        self.scoped_registries.iter_mut().find(|r| r.name == name)
    }

    pub fn registry(&self, name: &str) -> Option<&ScopedRegistry> {
        self.scoped_registries.iter().find(|r| r.name == name)
    }

    /// Converts the manifest back into a JSON document.
    ///
    /// Existing keys keep their position. `scopedRegistries` is only added
    /// to a document that lacked it when there is at least one registry.
    pub fn to_value(&self) -> Value {
        let mut fields = self.fields.clone();
        fields.insert(DEPENDENCIES_KEY.to_string(), json!(self.dependencies));
        if !self.scoped_registries.is_empty() || fields.contains_key(SCOPED_REGISTRIES_KEY) {
            fields.insert(SCOPED_REGISTRIES_KEY.to_string(), json!(self.scoped_registries));
        }
        Value::Object(fields)
    }

    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_value())?)
    }
}

impl FromStr for Manifest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(strip_bom(s))
            .map_err(|e| Error::MalformedManifestDocument(e.to_string()))?;
        Self::from_value(value)
    }
}

/// JSON Schema a replacement manifest has to satisfy.
fn manifest_schema() -> Value {
    json!({
        "type": "object",
        "required": [DEPENDENCIES_KEY],
        "properties": {
            DEPENDENCIES_KEY: {
                "type": "object",
                "additionalProperties": { "type": "string" }
            },
            SCOPED_REGISTRIES_KEY: {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "url"],
                    "properties": {
                        "name": { "type": "string" },
                        "url": { "type": "string" },
                        "scopes": { "type": "array", "items": { "type": "string" } }
                    }
                }
            }
        }
    })
}

/// Checks that `text` is a JSON object with a `dependencies` object.
///
/// # Errors
/// * `Error::MalformedManifestDocument` describing every violation found
pub fn validate_manifest_document(text: &str) -> Result<Value> {
    let document: Value = serde_json::from_str(strip_bom(text))
        .map_err(|e| Error::MalformedManifestDocument(e.to_string()))?;

    let schema = manifest_schema();
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| Error::MalformedManifestDocument(format!("invalid schema: {}", e)))?;

    let errors: Vec<String> = validator.iter_errors(&document).map(|e| e.to_string()).collect();
    if !errors.is_empty() {
        return Err(Error::MalformedManifestDocument(errors.join("; ")));
    }

    Ok(document)
}

/// Replaces the manifest at `manifest_path` with `text` after validating it.
///
/// Nothing is written when validation fails.
pub fn overwrite_manifest<P: AsRef<Path>>(text: &str, manifest_path: P) -> Result<()> {
    let manifest_path = manifest_path.as_ref();
    validate_manifest_document(text)?;
    debug!("Replacement manifest is valid, writing '{}'", manifest_path.display());
    write_file(text, manifest_path)?;
    info!("Replaced manifest '{}'", manifest_path.display());
    Ok(())
}
