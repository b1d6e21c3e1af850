//! Arrow conversion of merged JSON records
//!
//! Columns appear in the order their field is first seen across the
//! records. Every column is nullable.

use crate::error::{Error, Result};
use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Int64Array, ListArray, NullArray, StringArray,
    StructArray,
};
use arrow::buffer::OffsetBuffer;
use arrow::datatypes::{DataType, Field, Fields, Schema};
use arrow::record_batch::RecordBatch;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Infer a schema from a set of JSON records
pub fn infer_schema(records: &[Value]) -> Schema {
    let mut columns: Vec<(String, DataType)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Value::Object(obj) = record else {
            continue;
        };

        for (key, value) in obj {
            let inferred = infer_type(value);
            match positions.get(key) {
                Some(&index) => {
                    let merged = merge_types(&columns[index].1, &inferred);
                    columns[index].1 = merged;
                }
                None => {
                    positions.insert(key.clone(), columns.len());
                    columns.push((key.clone(), inferred));
                }
            }
        }
    }

    let fields: Vec<Field> = columns
        .into_iter()
        .map(|(name, dtype)| Field::new(name, dtype, true))
        .collect();

    Schema::new(fields)
}

/// Convert JSON records into a single `RecordBatch`
pub fn records_to_frame(records: &[Value]) -> Result<RecordBatch> {
    let schema = Arc::new(infer_schema(records));

    if records.is_empty() {
        return Ok(RecordBatch::new_empty(schema));
    }

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let values: Vec<Option<&Value>> = records
            .iter()
            .map(|record| match record {
                Value::Object(obj) => obj.get(field.name()),
                _ => None,
            })
            .collect();

        columns.push(build_array(&values, field.data_type())?);
    }

    Ok(RecordBatch::try_new(schema, columns)?)
}

fn infer_type(value: &Value) -> DataType {
    match value {
        Value::Null => DataType::Null,
        Value::Bool(_) => DataType::Boolean,
        Value::Number(n) if n.is_i64() => DataType::Int64,
        Value::Number(_) => DataType::Float64,
        Value::String(_) => DataType::Utf8,
        Value::Array(items) => {
            let item = items
                .iter()
                .fold(DataType::Null, |acc, item| merge_types(&acc, &infer_type(item)));
            list_of(item)
        }
        Value::Object(obj) => DataType::Struct(
            obj.iter()
                .map(|(key, value)| Field::new(key, infer_type(value), true))
                .collect(),
        ),
    }
}

/// Narrowest type holding both, falling back to text
fn merge_types(existing: &DataType, other: &DataType) -> DataType {
    match (existing, other) {
        (DataType::Null, other) | (other, DataType::Null) => other.clone(),
        (a, b) if a == b => a.clone(),
        (DataType::Int64, DataType::Float64) | (DataType::Float64, DataType::Int64) => {
            DataType::Float64
        }
        (DataType::List(a), DataType::List(b)) => {
            list_of(merge_types(a.data_type(), b.data_type()))
        }
        _ => DataType::Utf8,
    }
}

fn list_of(item: DataType) -> DataType {
    DataType::List(Arc::new(Field::new("item", item, true)))
}

fn build_array(values: &[Option<&Value>], data_type: &DataType) -> Result<ArrayRef> {
    match data_type {
        DataType::Null => Ok(Arc::new(NullArray::new(values.len()))),

        DataType::Boolean => {
            let arr: BooleanArray = values.iter().map(|v| v.and_then(Value::as_bool)).collect();
            Ok(Arc::new(arr))
        }

        DataType::Int64 => {
            let arr: Int64Array = values.iter().map(|v| v.and_then(Value::as_i64)).collect();
            Ok(Arc::new(arr))
        }

        DataType::Float64 => {
            let arr: Float64Array = values.iter().map(|v| v.and_then(Value::as_f64)).collect();
            Ok(Arc::new(arr))
        }

        DataType::List(field) => build_list_array(values, field),

        DataType::Struct(fields) => build_struct_array(values, fields),

        _ => {
            let arr: StringArray = values
                .iter()
                .map(|v| {
                    v.filter(|v| !v.is_null()).map(|v| match v {
                        Value::String(s) => s.clone(),
                        _ => v.to_string(),
                    })
                })
                .collect();
            Ok(Arc::new(arr))
        }
    }
}

fn build_list_array(values: &[Option<&Value>], field: &Arc<Field>) -> Result<ArrayRef> {
    let mut items: Vec<Option<&Value>> = Vec::new();
    let mut offsets: Vec<i32> = vec![0];

    for value in values {
        if let Some(Value::Array(arr)) = value {
            items.extend(arr.iter().map(Some));
        }
        let offset = i32::try_from(items.len())
            .map_err(|_| Error::decode("list column too large for i32 offsets"))?;
        offsets.push(offset);
    }

    let item_array = build_array(&items, field.data_type())?;
    let list = ListArray::try_new(
        Arc::clone(field),
        OffsetBuffer::new(offsets.into()),
        item_array,
        None,
    )?;
    Ok(Arc::new(list))
}

fn build_struct_array(values: &[Option<&Value>], fields: &Fields) -> Result<ArrayRef> {
    let mut children: Vec<ArrayRef> = Vec::with_capacity(fields.len());

    for field in fields {
        let child_values: Vec<Option<&Value>> = values
            .iter()
            .map(|v| match v {
                Some(Value::Object(obj)) => obj.get(field.name()),
                _ => None,
            })
            .collect();

        children.push(build_array(&child_values, field.data_type())?);
    }

    Ok(Arc::new(StructArray::try_new(fields.clone(), children, None)?))
}
