//! Page aggregation module
//!
//! Merges the pages of one retrieval into a single result.
//!
//! # Overview
//!
//! Each format has a merger that consumes [`Page`](crate::pagination::Page)s
//! in arrival order and produces the matching aggregate:
//!
//! - [`JsonMerger`] appends every page's `data` records into a [`JsonAggregate`]
//! - [`XmlMerger`] lifts every page's `<data>` elements into one `<document>`
//! - [`CsvMerger`] concatenates pages, keeping only the first header line
//!
//! JSON and markup aggregates also carry `lastUpdate`, `length` and
//! `totalPages`. Delimited text has nowhere to put them.

mod csv;
mod json;
mod types;
mod xml;

pub use csv::{CsvAggregate, CsvMerger};
pub use json::{JsonAggregate, JsonMerger};
pub use types::{Aggregate, AggregateMetadata, PageMerger};
pub use xml::{XmlAggregate, XmlMerger};
