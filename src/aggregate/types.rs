//! Aggregation types and traits

use super::{CsvAggregate, JsonAggregate, XmlAggregate};
use crate::error::Result;
use crate::pagination::Page;
use crate::types::DataFormat;
use std::path::Path;

/// Consumes pages in arrival order
pub trait PageMerger {
    /// Merge one page into the accumulated result
    fn push_page(&mut self, page: &Page) -> Result<()>;

    /// Number of records merged so far
    fn record_count(&self) -> usize;
}

/// Values attached to an aggregate once every page has been merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateMetadata {
    /// Normalized timestamp of the latest database update
    pub last_update: String,
    /// Number of data pages that were merged
    pub total_pages: u32,
}

/// A merged result in one of the supported formats
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate {
    Json(JsonAggregate),
    Xml(XmlAggregate),
    Csv(CsvAggregate),
}

impl Aggregate {
    /// Format of the merged pages
    pub fn format(&self) -> DataFormat {
        match self {
            Aggregate::Json(_) => DataFormat::Json,
            Aggregate::Xml(_) => DataFormat::Xml,
            Aggregate::Csv(_) => DataFormat::Csv,
        }
    }

    /// Number of records
    pub fn length(&self) -> usize {
        match self {
            Aggregate::Json(aggregate) => aggregate.length,
            Aggregate::Xml(aggregate) => aggregate.length(),
            Aggregate::Csv(aggregate) => aggregate.length(),
        }
    }

    /// Number of data pages merged
    pub fn total_pages(&self) -> u32 {
        match self {
            Aggregate::Json(aggregate) => aggregate.total_pages,
            Aggregate::Xml(aggregate) => aggregate.total_pages(),
            Aggregate::Csv(aggregate) => aggregate.total_pages(),
        }
    }

    /// Serialized form, as it would be persisted
    pub fn render(&self) -> Result<String> {
        match self {
            Aggregate::Json(aggregate) => aggregate.to_json_string(),
            Aggregate::Xml(aggregate) => aggregate.to_xml_string(),
            Aggregate::Csv(aggregate) => Ok(aggregate.text().to_string()),
        }
    }

    /// Persist to `path`, which must carry this format's extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        match self {
            Aggregate::Json(aggregate) => aggregate.save(path),
            Aggregate::Xml(aggregate) => aggregate.save(path),
            Aggregate::Csv(aggregate) => aggregate.save(path),
        }
    }
}

impl From<JsonAggregate> for Aggregate {
    fn from(aggregate: JsonAggregate) -> Self {
        Aggregate::Json(aggregate)
    }
}

impl From<XmlAggregate> for Aggregate {
    fn from(aggregate: XmlAggregate) -> Self {
        Aggregate::Xml(aggregate)
    }
}

impl From<CsvAggregate> for Aggregate {
    fn from(aggregate: CsvAggregate) -> Self {
        Aggregate::Csv(aggregate)
    }
}
