//! Markup-tree aggregation

use super::types::{AggregateMetadata, PageMerger};
use crate::error::Result;
use crate::pagination::Page;
use crate::types::DataFormat;
use crate::xml::XmlElement;
use std::path::Path;
use tracing::debug;

/// Root element of the merged document
pub const DOCUMENT_ELEMENT: &str = "document";

/// Element carrying one record
pub const RECORD_ELEMENT: &str = "data";

/// One `<document>` holding every page's records, followed by the
/// `lastUpdate`, `length` and `totalPages` elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAggregate {
    root: XmlElement,
    length: usize,
    last_update: String,
    total_pages: u32,
}

impl XmlAggregate {
    /// The merged tree
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Consume the aggregate, keeping the tree
    pub fn into_root(self) -> XmlElement {
        self.root
    }

    /// Record elements in page order
    pub fn records(&self) -> impl Iterator<Item = &XmlElement> {
        self.root.children_named(RECORD_ELEMENT)
    }

    /// Number of records
    pub fn length(&self) -> usize {
        self.length
    }

    /// Normalized timestamp of the latest database update
    pub fn last_update(&self) -> &str {
        &self.last_update
    }

    /// Number of data pages merged
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Serialized document, without an XML declaration
    pub fn to_xml_string(&self) -> Result<String> {
        self.root.to_xml_string()
    }

    /// Persist the serialized document to a `.xml` file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        crate::output::save_data(&self.to_xml_string()?, path, DataFormat::Xml)
    }
}

/// Lifts the outermost `<data>` elements of every page into one document
#[derive(Debug)]
pub struct XmlMerger {
    root: XmlElement,
    length: usize,
}

impl Default for XmlMerger {
    fn default() -> Self {
        Self {
            root: XmlElement::new(DOCUMENT_ELEMENT),
            length: 0,
        }
    }
}

impl XmlMerger {
    /// Create an empty merger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the metadata elements and produce the aggregate
    pub fn finish(self, metadata: AggregateMetadata) -> XmlAggregate {
        let mut root = self.root;
        root.push(XmlElement::with_text("lastUpdate", metadata.last_update.clone()));
        root.push(XmlElement::with_text("length", self.length.to_string()));
        root.push(XmlElement::with_text(
            "totalPages",
            metadata.total_pages.to_string(),
        ));

        XmlAggregate {
            root,
            length: self.length,
            last_update: metadata.last_update,
            total_pages: metadata.total_pages,
        }
    }
}

impl PageMerger for XmlMerger {
    fn push_page(&mut self, page: &Page) -> Result<()> {
        if page.is_blank() {
            return Ok(());
        }

        let records = XmlElement::parse(page.text()?)?.take_outermost(RECORD_ELEMENT);
        debug!("Merging {} records from page {}", records.len(), page.label());

        self.length += records.len();
        self.root.children.extend(records);
        Ok(())
    }

    fn record_count(&self) -> usize {
        self.length
    }
}
