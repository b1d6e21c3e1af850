//! Freshness and release timestamps
//!
//! `Last-Modified` headers arrive as RFC 1123 dates with whole-second
//! precision. They are rendered as ISO 8601 with a zero-padded microsecond
//! field and a `Z` suffix, e.g. `2020-01-01T00:00:00.000000Z`.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use chrono::NaiveDateTime;

/// Format of the `Last-Modified` header
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format of normalized timestamps
pub const ISO_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Field of the timestamp endpoint's body carrying the release timestamp
pub const RELEASE_TIMESTAMP_FIELD: &str = "websiteTimestamp";

/// Convert a `Last-Modified` value into the normalized timestamp form
pub fn normalize_last_modified(value: &str) -> Result<String> {
    let parsed = NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE_FORMAT).map_err(|e| {
        Error::InvalidTimestamp {
            value: value.to_string(),
            message: e.to_string(),
        }
    })?;

    Ok(parsed.format(ISO_TIMESTAMP_FORMAT).to_string())
}

/// Read the release timestamp from the timestamp endpoint's response body
///
/// The value is returned exactly as the service reports it.
pub fn extract_release_timestamp(body: &JsonValue) -> Result<String> {
    body.get(RELEASE_TIMESTAMP_FIELD)
        .and_then(JsonValue::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            Error::decode(format!(
                "timestamp response has no string '{RELEASE_TIMESTAMP_FIELD}' field"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("Wed, 01 Jan 2020 00:00:00 GMT", "2020-01-01T00:00:00.000000Z" ; "new year")]
    #[test_case("Sun, 01 Nov 2020 15:32:07 GMT", "2020-11-01T15:32:07.000000Z" ; "afternoon")]
    #[test_case(" Mon, 29 Feb 2016 23:59:59 GMT ", "2016-02-29T23:59:59.000000Z" ; "leap day padded")]
    fn test_normalize_last_modified(input: &str, expected: &str) {
        assert_eq!(normalize_last_modified(input).unwrap(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("2020-01-01T00:00:00Z" ; "already iso")]
    #[test_case("Wed, 32 Jan 2020 00:00:00 GMT" ; "impossible day")]
    fn test_normalize_last_modified_rejects(input: &str) {
        let err = normalize_last_modified(input).unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_extract_release_timestamp() {
        let body = json!({"websiteTimestamp": "2020-11-01T15:44:11.1372034Z"});
        assert_eq!(
            extract_release_timestamp(&body).unwrap(),
            "2020-11-01T15:44:11.1372034Z"
        );
    }

    #[test]
    fn test_extract_release_timestamp_missing_field() {
        assert!(matches!(
            extract_release_timestamp(&json!({"timestamp": "x"})),
            Err(Error::Decode { .. })
        ));
        assert!(extract_release_timestamp(&json!({"websiteTimestamp": 1})).is_err());
    }
}
