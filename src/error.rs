//! Error types for the dashboard API client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::types::{DataFormat, ParamMap};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the dashboard API client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("{0}")]
    RequestFailed(Box<FailedRequest>),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Response is missing the '{header}' header")]
    MissingHeader { header: String },

    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("CSV structure cannot be nested. Received:\n{structure}")]
    NestedStructure { structure: String },

    #[error(transparent)]
    Destination(#[from] DestinationError),

    #[error("Optional dependency missing: enable the '{feature}' feature to use this operation")]
    MissingCapability { feature: &'static str },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("XML parsing error: {message}")]
    XmlParse { message: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Invalid timestamp '{value}': {message}")]
    InvalidTimestamp { value: String, message: String },

    #[cfg(feature = "dataframe")]
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an XML parse error
    pub fn xml(message: impl Into<String>) -> Self {
        Self::XmlParse {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing header error
    pub fn missing_header(header: impl Into<String>) -> Self {
        Self::MissingHeader {
            header: header.into(),
        }
    }

    /// The failed request, if this error came from a rejected page fetch
    pub fn failed_request(&self) -> Option<&FailedRequest> {
        match self {
            Error::RequestFailed(failed) => Some(failed),
            _ => None,
        }
    }

    /// Check if this error was raised before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::NestedStructure { .. } | Error::Destination(_))
    }
}

impl From<FailedRequest> for Error {
    fn from(failed: FailedRequest) -> Self {
        Self::RequestFailed(Box::new(failed))
    }
}

/// A request the service answered with a client or server error status
///
/// Carries everything needed to reproduce the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRequest {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase for the status
    pub reason: String,
    /// Raw response body
    pub body: String,
    /// Request URL as sent
    pub url: String,
    /// Request URL with the query string percent-decoded
    pub decoded_url: String,
    /// Parameters that produced the request
    pub params: ParamMap,
}

impl fmt::Display for FailedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = if self.body.is_empty() {
            "No response"
        } else {
            self.body.as_str()
        };

        writeln!(f, "Request failed .... {} - {}", self.status, self.reason)?;
        writeln!(f, "Response .......... {body}")?;
        writeln!(f, "URL ............... {}", self.url)?;
        writeln!(f, "Decoded URL ....... {}", self.decoded_url)?;
        writeln!(f, "Parameters:")?;
        for (key, value) in &self.params {
            writeln!(f, "  {key:?}: {value:?}")?;
        }
        Ok(())
    }
}

/// Reasons a persistence destination is rejected before writing
#[derive(Error, Debug)]
pub enum DestinationError {
    #[error("No file name: the path must define a filename. Currently: <{}>", .path.display())]
    IsADirectory { path: PathBuf },

    #[error("The path does not end with the correct extension for this format. Expected a file ending with '.{expected}', got '{found}' instead")]
    InvalidExtension { expected: DataFormat, found: String },

    #[error("The parent directory for the file '{}' must already exist", .path.display())]
    MissingParent { path: PathBuf },

    #[error("No 'write' permission for <{}>", .dir.display())]
    PermissionDenied { dir: PathBuf },
}

/// Result type alias for the dashboard API client
pub type Result<T> = std::result::Result<T, Error>;
