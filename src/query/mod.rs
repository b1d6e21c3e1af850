//! Query module
//!
//! A [`Query`] names the subset (filters), the shape (structure) and
//! optionally the single latest value (`latestBy`) to retrieve. It is built
//! once and can back any number of retrievals in any format.

mod params;
mod types;

pub use params::{
    build_params, FILTERS_PARAM, FILTER_SEPARATOR, FORMAT_PARAM, LATEST_BY_PARAM, PAGE_PARAM,
    STRUCTURE_PARAM,
};
pub use types::{Query, Structure};
