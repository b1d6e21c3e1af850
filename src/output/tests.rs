//! Tests for output module

use super::*;
use crate::error::{DestinationError, Error};
use crate::types::DataFormat;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;
use test_case::test_case;

// ============================================================================
// Persistence Tests
// ============================================================================

#[test]
fn test_save_data_writes_content_with_trailing_newline() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");

    save_data(r#"{"data":[]}"#, &path, DataFormat::Json).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"data\":[]}\n");

    save_data("name,cases\nEngland,1\n", dir.path().join("data.csv"), DataFormat::Csv).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("data.csv")).unwrap(),
        "name,cases\nEngland,1\n"
    );
}

#[test]
fn test_save_data_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.xml");
    fs::write(&path, "old content that is longer than the new one").unwrap();

    save_data("<document/>", &path, DataFormat::Xml).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "<document/>\n");
}

#[test_case("data.JSON", DataFormat::Json ; "uppercase extension")]
#[test_case("data.Csv", DataFormat::Csv ; "mixed case extension")]
#[test_case("data.v2.xml", DataFormat::Xml ; "dotted stem")]
fn test_save_data_accepts_extension(name: &str, format: DataFormat) {
    let dir = tempdir().unwrap();
    save_data("content", dir.path().join(name), format).unwrap();
}

#[test]
fn test_save_data_rejects_directory() {
    let dir = tempdir().unwrap();

    let err = save_data("{}", dir.path(), DataFormat::Json).unwrap_err();
    assert!(matches!(
        err,
        Error::Destination(DestinationError::IsADirectory { .. })
    ));

    let trailing = format!("{}/", dir.path().join("missing").display());
    let err = save_data("{}", &trailing, DataFormat::Json).unwrap_err();
    assert!(matches!(
        err,
        Error::Destination(DestinationError::IsADirectory { .. })
    ));
}

#[test_case("data.csv", DataFormat::Json, "csv" ; "other format")]
#[test_case("data", DataFormat::Xml, "" ; "no extension")]
#[test_case("data.jsonl", DataFormat::Json, "jsonl" ; "extension prefix")]
fn test_save_data_rejects_extension(name: &str, format: DataFormat, found: &str) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);

    let err = save_data("content", &path, format).unwrap_err();
    match err {
        Error::Destination(DestinationError::InvalidExtension {
            expected,
            found: actual,
        }) => {
            assert_eq!(expected, format);
            assert_eq!(actual, found);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!path.exists());
}

#[test]
fn test_save_data_rejects_missing_parent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("data.json");

    let err = save_data("{}", &path, DataFormat::Json).unwrap_err();
    match err {
        Error::Destination(DestinationError::MissingParent { path: parent }) => {
            assert_eq!(parent, dir.path().join("nested"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[test]
fn test_save_data_rejects_read_only_parent() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    let result = save_data("{}", locked.join("data.json"), DataFormat::Json);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(
        result,
        Err(Error::Destination(DestinationError::PermissionDenied { .. }))
    ));
    assert!(!locked.join("data.json").exists());
}

#[test]
fn test_validate_destination_relative_path() {
    let parent = validate_destination(std::path::Path::new("data.csv"), DataFormat::Csv).unwrap();
    assert_eq!(parent, std::path::PathBuf::from("."));
}

// ============================================================================
// Data Frame Tests
// ============================================================================

#[cfg(feature = "dataframe")]
mod frame_tests {
    use super::super::*;
    use arrow::array::{Array, Int64Array, StringArray};
    use arrow::datatypes::DataType;
    use serde_json::json;

    #[test]
    fn test_infer_schema_empty() {
        assert!(infer_schema(&[]).fields().is_empty());
    }

    #[test]
    fn test_infer_schema_keeps_first_seen_order() {
        let records = vec![
            json!({"date": "2020-11-01", "name": "England", "cases": 20572}),
            json!({"date": "2020-10-31", "name": "Wales", "cases": null, "deaths": 3}),
        ];

        let schema = infer_schema(&records);
        let names: Vec<_> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, vec!["date", "name", "cases", "deaths"]);
        assert_eq!(schema.field(2).data_type(), &DataType::Int64);
        assert!(schema.field(2).is_nullable());
    }

    #[test]
    fn test_infer_schema_type_promotion() {
        let records = vec![
            json!({"rate": 1, "flag": true}),
            json!({"rate": 2.5, "flag": "yes"}),
        ];

        let schema = infer_schema(&records);
        assert_eq!(schema.field(0).data_type(), &DataType::Float64);
        assert_eq!(schema.field(1).data_type(), &DataType::Utf8);
    }

    #[test]
    fn test_infer_schema_widens_list_items() {
        let records = vec![
            json!({"tags": []}),
            json!({"tags": ["a", null]}),
            json!({"tags": [1, 2.5]}),
        ];

        let schema = infer_schema(&records);
        let DataType::List(item) = schema.field(0).data_type() else {
            panic!("expected a list column");
        };
        assert_eq!(item.data_type(), &DataType::Utf8);

        let batch = records_to_frame(&records).unwrap();
        assert_eq!(batch.num_rows(), 3);
    }

    #[test]
    fn test_records_to_frame() {
        let records = vec![
            json!({"name": "England", "cases": 20572}),
            json!({"name": "Wales", "cases": null}),
            json!({"name": "Scotland"}),
        ];

        let batch = records_to_frame(&records).unwrap();
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 2);

        let names = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(names.value(2), "Scotland");

        let cases = batch
            .column(1)
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(cases.value(0), 20572);
        assert!(cases.is_null(1));
        assert!(cases.is_null(2));
    }

    #[test]
    fn test_records_to_frame_nested_values() {
        let records = vec![
            json!({"area": {"code": "E92000001", "name": "England"}, "tags": ["a", "b"]}),
            json!({"area": {"code": "W92000004", "name": "Wales"}, "tags": ["c"]}),
        ];

        let batch = records_to_frame(&records).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert!(matches!(batch.schema().field(0).data_type(), DataType::Struct(_)));
        assert!(matches!(batch.schema().field(1).data_type(), DataType::List(_)));
    }

    #[test]
    fn test_records_to_frame_empty() {
        let batch = records_to_frame(&[]).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 0);
    }
}
