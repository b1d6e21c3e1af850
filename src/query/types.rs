//! Query and structure types

use super::params::build_params;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, ParamMap};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fmt;

// ============================================================================
// Structure
// ============================================================================

/// Field selection and renaming: output field name -> source field name
///
/// Keys keep insertion order, which is also the order the service uses for
/// output columns. A value may itself be a structure (a nested group); the
/// service accepts that for JSON and XML, CSV requires a flat structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "JsonObject", into = "JsonObject")]
pub struct Structure(JsonObject);

impl Structure {
    /// Create an empty structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `source` under the output name `output`
    #[must_use]
    pub fn field(mut self, output: impl Into<String>, source: impl Into<String>) -> Self {
        self.0
            .insert(output.into(), JsonValue::String(source.into()));
        self
    }

    /// Group a nested structure under the output name `output`
    #[must_use]
    pub fn nested(mut self, output: impl Into<String>, structure: Structure) -> Self {
        self.0.insert(output.into(), JsonValue::Object(structure.0));
        self
    }

    /// Output field names, in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of top-level output fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field is selected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The underlying JSON object
    pub fn as_object(&self) -> &JsonObject {
        &self.0
    }

    /// Whether every value is a plain field reference
    pub fn is_flat(&self) -> bool {
        self.0.values().all(JsonValue::is_string)
    }

    /// Fail with [`Error::NestedStructure`] unless the structure is flat
    pub fn ensure_flat(&self) -> Result<()> {
        if self.is_flat() {
            return Ok(());
        }

        let structure = serde_json::to_string_pretty(&self.0)?;
        Err(Error::NestedStructure { structure })
    }

    /// Compact, deterministic encoding used as the `structure` parameter
    pub fn to_param(&self) -> String {
        // Map serialization cannot fail: keys are strings and values are JSON.
        JsonValue::Object(self.0.clone()).to_string()
    }
}

impl TryFrom<JsonObject> for Structure {
    type Error = Error;

    fn try_from(object: JsonObject) -> Result<Self> {
        for (key, value) in &object {
            match value {
                JsonValue::String(_) => {}
                JsonValue::Object(inner) => {
                    Structure::try_from(inner.clone())?;
                }
                other => {
                    return Err(Error::config(format!(
                        "structure value for '{key}' must be a field name or a nested structure, got {other}"
                    )));
                }
            }
        }
        Ok(Self(object))
    }
}

impl TryFrom<JsonValue> for Structure {
    type Error = Error;

    fn try_from(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(object) => Structure::try_from(object),
            other => Err(Error::config(format!(
                "structure must be a JSON object, got {other}"
            ))),
        }
    }
}

impl From<Structure> for JsonObject {
    fn from(structure: Structure) -> Self {
        structure.0
    }
}

impl<K, V> FromIterator<(K, V)> for Structure
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Structure::new(), |structure, (output, source)| {
                structure.field(output, source)
            })
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_param())
    }
}

// ============================================================================
// Query
// ============================================================================

/// Filters, structure and optional `latestBy` metric for one dataset
///
/// Immutable once built. Every retrieval re-derives its parameters from the
/// query, so one query can back JSON, XML and CSV retrievals independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    filters: Vec<String>,
    structure: Structure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    latest_by: Option<String>,
}

impl Query {
    /// Create a query over all pages
    pub fn new<I, S>(filters: I, structure: Structure) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            filters: filters.into_iter().map(Into::into).collect(),
            structure,
            latest_by: None,
        }
    }

    /// Only retrieve the latest value of `metric` (single request, no paging)
    #[must_use]
    pub fn with_latest_by(mut self, metric: impl Into<String>) -> Self {
        self.latest_by = Some(metric.into());
        self
    }

    /// Load a query from YAML (`filters`, `structure`, optional `latestBy`)
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Filter expressions, in the order they are sent
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// Field selection
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Metric used for latest-value retrieval, if any
    pub fn latest_by(&self) -> Option<&str> {
        self.latest_by.as_deref()
    }

    /// Whether this query bypasses pagination
    pub fn is_latest(&self) -> bool {
        self.latest_by.is_some()
    }

    /// Base request parameters (without `format` and `page`)
    pub fn params(&self) -> ParamMap {
        build_params(&self.filters, &self.structure, self.latest_by())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut params = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut params, formatter);
        self.params()
            .serialize(&mut serializer)
            .map_err(|_| fmt::Error)?;
        let params = String::from_utf8(params).map_err(|_| fmt::Error)?;

        writeln!(f, "COVID-19 in the UK - API Service")?;
        writeln!(f, "Current parameters: ")?;
        f.write_str(&params)
    }
}
