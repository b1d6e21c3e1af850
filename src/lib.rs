// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # UK COVID-19 dashboard API client
//!
//! Retrieves paginated public-health statistics from the UK coronavirus
//! dashboard service and merges the pages into one dataset.
//!
//! ## Features
//!
//! - **Queries**: filters, field selection structure and latest-value mode
//! - **Pull-based paging**: one request per page, end of data on `204 No Content`
//! - **Three formats**: merged JSON records, one XML document or CSV text
//! - **Freshness metadata**: `lastUpdate`, `length` and `totalPages` on every
//!   JSON/XML aggregate, plus the global release timestamp
//! - **Persistence**: validated saving to `.json`, `.xml` and `.csv` files
//! - **Arrow output**: merged JSON records as a `RecordBatch` (`dataframe` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use uk_covid19::{DashboardApi, DataFormat, Query, Result, Structure};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let query = Query::new(
//!         ["areaType=nation"],
//!         Structure::new()
//!             .field("date", "date")
//!             .field("name", "areaName")
//!             .field("cases", "newCasesBySpecimenDate"),
//!     );
//!
//!     let api = DashboardApi::new()?;
//!
//!     let data = api.get_json(&query).await?;
//!     println!("{} records over {} pages", data.length, data.total_pages);
//!
//!     api.get(&query, DataFormat::Csv).await?.save("cases.csv")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          DashboardApi                           │
//! │  get_json / get_xml / get_csv    head / options / last_update   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │  Query   │   HTTP    │    Pager      │ Aggregate │   Output    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ filters  │ Transport │ page=1,2,...  │ JSON      │ save_data   │
//! │ structure│ reqwest   │ 204 = end     │ XML       │ Arrow       │
//! │ latestBy │           │ latestBy      │ CSV       │             │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Query parameters
pub mod query;

/// HTTP transport
pub mod http;

/// Page-by-page retrieval
pub mod pagination;

/// Owned XML element tree
pub mod xml;

/// Page merging per format
pub mod aggregate;

/// Freshness and release timestamps
pub mod metadata;

/// File persistence and Arrow conversion
pub mod output;

/// Client configuration
pub mod config;

/// Async client
pub mod api;

/// Synchronous client
pub mod blocking;

#[cfg(test)]
pub(crate) mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{DestinationError, Error, FailedRequest, Result};
pub use types::*;

// Re-export commonly used types
pub use aggregate::{Aggregate, CsvAggregate, JsonAggregate, XmlAggregate};
pub use api::DashboardApi;
pub use blocking::BlockingDashboardApi;
pub use config::ApiConfig;
pub use pagination::{Page, Pager};
pub use query::{build_params, Query, Structure};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
