//! Parameter construction
//!
//! Turns filters, structure and `latestBy` into the query parameters the
//! service expects. Pure: no network access.

use super::types::Structure;
use crate::types::ParamMap;

/// Parameter carrying the `;`-joined filter expressions
pub const FILTERS_PARAM: &str = "filters";

/// Parameter carrying the compact JSON structure
pub const STRUCTURE_PARAM: &str = "structure";

/// Parameter naming the metric for single latest-value retrieval
pub const LATEST_BY_PARAM: &str = "latestBy";

/// Parameter selecting the response encoding
pub const FORMAT_PARAM: &str = "format";

/// Parameter carrying the 1-based page number
pub const PAGE_PARAM: &str = "page";

/// Separator between filter expressions; order is significant to the service
pub const FILTER_SEPARATOR: &str = ";";

/// Build the base parameter mapping for a query
///
/// `latestBy` is only present when given; it is never sent empty.
pub fn build_params<S: AsRef<str>>(
    filters: &[S],
    structure: &Structure,
    latest_by: Option<&str>,
) -> ParamMap {
    let joined = filters
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(FILTER_SEPARATOR);

    let mut params = ParamMap::new();
    params.insert(FILTERS_PARAM.to_string(), joined);
    params.insert(STRUCTURE_PARAM.to_string(), structure.to_param());

    if let Some(metric) = latest_by {
        params.insert(LATEST_BY_PARAM.to_string(), metric.to_string());
    }

    params
}
