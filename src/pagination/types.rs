//! Pagination types
//!
//! The page cursor and the page payload handed to aggregators.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use bytes::Bytes;
use std::fmt;

/// 1-based page number owned by a single pager
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageCursor(u32);

impl PageCursor {
    /// Cursor positioned on the first page
    pub const fn first() -> Self {
        Self(1)
    }

    /// Current page number
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Cursor for the following page
    #[must_use]
    pub const fn advance(self) -> Self {
        Self(self.0 + 1)
    }

    /// Number of pages accepted before this one
    pub const fn pages_before(self) -> u32 {
        self.0 - 1
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::first()
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One accepted page of the response
#[derive(Debug, Clone)]
pub struct Page {
    /// Page number, absent for a `latestBy` request
    pub number: Option<u32>,
    /// URL the page was fetched from
    pub url: String,
    /// `Last-Modified` header of the page response
    pub last_modified: Option<String>,
    /// Raw page body
    pub body: Bytes,
}

impl Page {
    /// Create a page from a raw body
    pub fn new(number: Option<u32>, body: impl Into<Bytes>) -> Self {
        Self {
            number,
            url: String::new(),
            last_modified: None,
            body: body.into(),
        }
    }

    /// Body as UTF-8 text
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.body).map_err(|e| {
            Error::decode(format!("page {} is not valid UTF-8: {e}", self.label()))
        })
    }

    /// Body parsed as JSON
    pub fn json(&self) -> Result<JsonValue> {
        serde_json::from_slice(&self.body).map_err(|e| {
            Error::decode(format!("Failed to parse JSON on page {}: {e}", self.label()))
        })
    }

    /// Whether the body holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    pub(crate) fn label(&self) -> String {
        self.number
            .map_or_else(|| "latest".to_string(), |n| n.to_string())
    }
}
