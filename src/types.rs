//! Common types used throughout the crate
//!
//! This module contains shared type definitions, type aliases,
//! and the closed set of output formats the service supports.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Query parameters sent to the service, keyed by parameter name
pub type ParamMap = BTreeMap<String, String>;

// ============================================================================
// Data Format
// ============================================================================

/// Output encoding requested from the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// Structured records
    #[default]
    Json,
    /// Markup tree
    Xml,
    /// Delimited text
    Csv,
}

impl DataFormat {
    /// All supported formats
    pub const ALL: [DataFormat; 3] = [DataFormat::Json, DataFormat::Xml, DataFormat::Csv];

    /// Value of the `format` query parameter
    pub const fn as_str(self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Xml => "xml",
            DataFormat::Csv => "csv",
        }
    }

    /// File extension expected when persisting this format
    pub const fn extension(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(DataFormat::Json),
            "xml" => Ok(DataFormat::Xml),
            "csv" => Ok(DataFormat::Csv),
            other => Err(Error::config(format!(
                "format must be one of 'csv, json, xml', got '{other}'"
            ))),
        }
    }
}
