//! Output module
//!
//! Persistence of aggregated results to validated file destinations and,
//! behind the `dataframe` feature, conversion of merged JSON records into
//! Arrow record batches.

#[cfg(feature = "dataframe")]
mod frame;
mod writer;

#[cfg(feature = "dataframe")]
pub use frame::{infer_schema, records_to_frame};
pub use writer::{save_data, validate_destination};

#[cfg(test)]
mod tests;
