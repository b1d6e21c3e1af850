//! Structured-record aggregation

use super::types::{AggregateMetadata, PageMerger};
use crate::error::{Error, Result};
use crate::pagination::Page;
use crate::types::{DataFormat, JsonValue};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Records of every page plus the derived metadata
///
/// Serializes with the keys `data`, `lastUpdate`, `length`, `totalPages`
/// in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonAggregate {
    /// Records in page order, then in-page order
    pub data: Vec<JsonValue>,
    /// Normalized timestamp of the latest database update
    pub last_update: String,
    /// Number of records
    pub length: usize,
    /// Number of data pages merged
    pub total_pages: u32,
}

impl JsonAggregate {
    /// Aggregate as a JSON value
    pub fn to_value(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }

    /// Compact serialized form
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Persist the compact serialized form to a `.json` file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        crate::output::save_data(&self.to_json_string()?, path, DataFormat::Json)
    }

    /// Records as an Arrow `RecordBatch`
    #[cfg(feature = "dataframe")]
    pub fn to_frame(&self) -> Result<arrow::record_batch::RecordBatch> {
        crate::output::records_to_frame(&self.data)
    }

    /// Records as an Arrow `RecordBatch`
    ///
    /// Always fails: the crate was built without the `dataframe` feature.
    #[cfg(not(feature = "dataframe"))]
    pub fn to_frame(&self) -> Result<()> {
        Err(Error::MissingCapability {
            feature: "dataframe",
        })
    }
}

/// Appends the `data` array of every page
#[derive(Debug, Default)]
pub struct JsonMerger {
    data: Vec<JsonValue>,
}

impl JsonMerger {
    /// Create an empty merger
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the metadata and produce the aggregate
    pub fn finish(self, metadata: AggregateMetadata) -> JsonAggregate {
        JsonAggregate {
            length: self.data.len(),
            data: self.data,
            last_update: metadata.last_update,
            total_pages: metadata.total_pages,
        }
    }
}

impl PageMerger for JsonMerger {
    fn push_page(&mut self, page: &Page) -> Result<()> {
        if page.is_blank() {
            return Ok(());
        }

        let mut body = page.json()?;
        match body.get_mut("data").map(JsonValue::take) {
            Some(JsonValue::Array(records)) => {
                debug!("Merging {} records from page {}", records.len(), page.label());
                self.data.extend(records);
                Ok(())
            }
            Some(JsonValue::Null) | None => Err(Error::decode(format!(
                "page {} has no 'data' field",
                page.label()
            ))),
            Some(other) => Err(Error::decode(format!(
                "page {} has a non-array 'data' field: {other}",
                page.label()
            ))),
        }
    }

    fn record_count(&self) -> usize {
        self.data.len()
    }
}
