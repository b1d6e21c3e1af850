//! Delimited-text aggregation

use super::types::PageMerger;
use crate::error::Result;
use crate::pagination::Page;
use crate::types::DataFormat;
use std::path::Path;
use tracing::debug;

/// Concatenated pages under a single header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvAggregate {
    text: String,
    length: usize,
    total_pages: u32,
}

impl CsvAggregate {
    /// Merged text, ending with a newline unless empty
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines of the merged text, header first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Number of data records, header excluded
    ///
    /// A quoted field spanning several lines counts once.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of data pages merged
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Consume the aggregate, keeping the text
    pub fn into_text(self) -> String {
        self.text
    }

    /// Persist the merged text to a `.csv` file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        crate::output::save_data(&self.text, path, DataFormat::Csv)
    }
}

/// Joins pages with one line terminator, keeping only the first page's header
#[derive(Debug, Default)]
pub struct CsvMerger {
    text: String,
    records: usize,
    seen_header: bool,
}

impl CsvMerger {
    /// Create an empty merger
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the aggregate
    pub fn finish(self, total_pages: u32) -> CsvAggregate {
        let mut text = self.text;
        if !text.is_empty() {
            text.push('\n');
        }

        CsvAggregate {
            text,
            length: self.records.saturating_sub(1),
            total_pages,
        }
    }
}

impl PageMerger for CsvMerger {
    fn push_page(&mut self, page: &Page) -> Result<()> {
        let mut body = page.text()?.trim_end();

        if self.seen_header {
            let header_end = record_breaks(body).next();
            body = header_end.map_or("", |end| &body[end + 1..]);
        }

        if body.is_empty() {
            return Ok(());
        }

        self.seen_header = true;
        let records = record_breaks(body).count() + 1;
        debug!("Merging {} records from page {}", records, page.label());

        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(body);
        self.records += records;
        Ok(())
    }

    fn record_count(&self) -> usize {
        self.records.saturating_sub(1)
    }
}

/// Byte offsets of the newlines that end a record
///
/// Newlines inside a double-quoted field are part of the field.
fn record_breaks(body: &str) -> impl Iterator<Item = usize> + '_ {
    let mut quoted = false;
    body.bytes().enumerate().filter_map(move |(index, byte)| match byte {
        b'"' => {
            quoted = !quoted;
            None
        }
        b'\n' if !quoted => Some(index),
        _ => None,
    })
}
