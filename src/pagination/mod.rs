//! Pagination module
//!
//! # Overview
//!
//! The service splits a dataset into numbered pages (`page=1, 2, ...`) and
//! answers one extra request past the last page with `204 No Content`.
//! [`Pager`] walks that sequence one request per pull, recording the
//! freshness header and the page total as it goes. A `latestBy` query is a
//! single unpaged request.

mod pager;
mod types;

pub(crate) use pager::failed_request;
pub use pager::{PageStream, Pager};
pub use types::{Page, PageCursor};

#[cfg(test)]
mod tests;
