//! JSON codec
//!
//! Reads either the column-oriented shape `{"col": {"0": v, "1": v}}` or an
//! array of record objects. Writes the column-oriented shape, with bins as
//! `[min, max]` pairs. Bins in that shape are read back as bins.

use super::traits::{CodecError, TableCodec};
use super::Format;
use crate::domain::{Bin, Column, Dataset, Value};
use serde_json::{Map, Number, Value as JsonValue};
use std::collections::HashSet;

/// JSON tables
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl TableCodec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn read(&self, bytes: &[u8]) -> Result<Dataset, CodecError> {
        match serde_json::from_slice::<JsonValue>(bytes)? {
            JsonValue::Object(columns) => read_columns(columns),
            JsonValue::Array(records) => read_records(records),
            _ => Err(CodecError::Shape(
                "expected an object of columns or an array of records".to_string(),
            )),
        }
    }

    fn write(&self, dataset: &Dataset) -> Result<Vec<u8>, CodecError> {
        let mut document = Map::new();
        for column in dataset.columns() {
            let cells: Map<String, JsonValue> = column
                .values()
                .iter()
                .enumerate()
                .map(|(row, value)| (row.to_string(), to_json(value)))
                .collect();
            document.insert(column.name().to_string(), JsonValue::Object(cells));
        }
        Ok(serde_json::to_vec(&JsonValue::Object(document))?)
    }
}

fn read_columns(columns: Map<String, JsonValue>) -> Result<Dataset, CodecError> {
    let mut parsed = Vec::with_capacity(columns.len());
    let mut row_keys: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (name, cells) in columns {
        let JsonValue::Object(cells) = cells else {
            return Err(CodecError::Shape(format!(
                "column '{name}' must map row labels to values"
            )));
        };
        for key in cells.keys() {
            if seen.insert(key.clone()) {
                row_keys.push(key.clone());
            }
        }
        parsed.push((name, cells));
    }

    // Row labels written by pandas-style exporters are positions
    if let Some(mut numbered) = row_keys
        .iter()
        .map(|k| k.parse::<usize>().ok().map(|n| (n, k.clone())))
        .collect::<Option<Vec<_>>>()
    {
        numbered.sort();
        row_keys = numbered.into_iter().map(|(_, k)| k).collect();
    }

    let columns = parsed
        .into_iter()
        .map(|(name, cells)| {
            let values = row_keys
                .iter()
                .map(|key| cells.get(key).map_or(Value::Null, from_json))
                .collect();
            Column::infer(name, values)
        })
        .collect();
    Ok(Dataset::new(columns)?)
}

fn read_records(records: Vec<JsonValue>) -> Result<Dataset, CodecError> {
    let mut rows = Vec::with_capacity(records.len());
    let mut names: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (index, record) in records.into_iter().enumerate() {
        let JsonValue::Object(record) = record else {
            return Err(CodecError::Shape(format!("record {index} is not an object")));
        };
        for key in record.keys() {
            if seen.insert(key.clone()) {
                names.push(key.clone());
            }
        }
        rows.push(record);
    }

    let columns = names
        .into_iter()
        .map(|name| {
            let values = rows
                .iter()
                .map(|row| row.get(&name).map_or(Value::Null, from_json))
                .collect();
            Column::infer(name, values)
        })
        .collect();
    Ok(Dataset::new(columns)?)
}

fn from_json(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => n.as_f64().map_or(Value::Null, Value::Float),
        },
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(pair) => match pair.as_slice() {
            [min, max] => match (min.as_f64(), max.as_f64()) {
                (Some(min), Some(max)) if min <= max => Value::Range(Bin::new(min, max)),
                _ => Value::Text(value.to_string()),
            },
            _ => Value::Text(value.to_string()),
        },
        JsonValue::Object(_) => Value::Text(value.to_string()),
    }
}

fn to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(i) => JsonValue::from(*i),
        Value::Float(f) => float(*f),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::Range(bin) => JsonValue::Array(vec![float(bin.min), float(bin.max)]),
    }
}

fn float(value: f64) -> JsonValue {
    Number::from_f64(value).map_or(JsonValue::Null, JsonValue::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ElementKind;
    use serde_json::json;

    #[test]
    fn test_read_column_oriented() {
        let input = json!({
            "name": {"0": "Ada", "1": "Bo", "10": "Cy", "2": null},
            "age": {"0": 36, "1": 41, "2": 29, "10": 50}
        });
        let dataset = JsonCodec.read(input.to_string().as_bytes()).unwrap();

        assert_eq!(dataset.column_names(), vec!["name", "age"]);
        assert_eq!(dataset.height(), 4);
        // Numeric labels are ordered by position, not text
        let age = dataset.column("age").unwrap();
        assert_eq!(
            age.values(),
            &[Value::Int(36), Value::Int(41), Value::Int(29), Value::Int(50)]
        );
        assert_eq!(dataset.column("name").unwrap().get(2), Some(&Value::Null));
    }

    #[test]
    fn test_read_records() {
        let input = json!([
            {"name": "Ada", "score": 1.5},
            {"name": "Bo", "member": true},
        ]);
        let dataset = JsonCodec.read(input.to_string().as_bytes()).unwrap();

        assert_eq!(dataset.column_names(), vec!["name", "score", "member"]);
        assert_eq!(dataset.column("score").unwrap().get(1), Some(&Value::Null));
        assert_eq!(dataset.column("score").unwrap().kind(), ElementKind::Float);
    }

    #[test]
    fn test_read_wide_tables() {
        let rows = 20_000;
        let ids: Map<String, JsonValue> = (0..rows)
            .map(|i| (i.to_string(), JsonValue::from(i)))
            .collect();
        // Second column labels rows in reverse and skips the first one
        let tags: Map<String, JsonValue> = (1..rows)
            .rev()
            .map(|i| (i.to_string(), JsonValue::from("t")))
            .collect();
        let input = json!({"id": ids, "tag": tags});
        let dataset = JsonCodec.read(input.to_string().as_bytes()).unwrap();

        assert_eq!(dataset.height(), rows);
        let id = dataset.column("id").unwrap();
        assert_eq!(id.get(0), Some(&Value::Int(0)));
        assert_eq!(id.get(rows - 1), Some(&Value::Int(rows as i64 - 1)));
        assert_eq!(dataset.column("tag").unwrap().null_count(), 1);

        let records: Vec<JsonValue> = (0..rows)
            .map(|i| json!({"id": i, (format!("k{}", i % 3)): true}))
            .collect();
        let input = JsonValue::Array(records);
        let dataset = JsonCodec.read(input.to_string().as_bytes()).unwrap();
        assert_eq!(dataset.column_names(), vec!["id", "k0", "k1", "k2"]);
        assert_eq!(dataset.height(), rows);
    }

    #[test]
    fn test_read_rejects_scalars() {
        assert!(matches!(
            JsonCodec.read(b"42"),
            Err(CodecError::Shape(_))
        ));
        assert!(matches!(
            JsonCodec.read(br#"{"a": [1, 2, 3]}"#),
            Err(CodecError::Shape(_))
        ));
    }

    #[test]
    fn test_write_column_oriented() {
        let dataset = Dataset::new(vec![
            Column::new(
                "age",
                ElementKind::Range,
                vec![Value::Range(Bin::new(20.0, 29.5)), Value::Null],
            ),
            Column::text("city", ["Oslo", "Rome"]),
        ])
        .unwrap();

        let bytes = JsonCodec.write(&dataset).unwrap();
        let value: JsonValue = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value,
            json!({
                "age": {"0": [20.0, 29.5], "1": null},
                "city": {"0": "Oslo", "1": "Rome"}
            })
        );
    }

    #[test]
    fn test_bins_survive_reload() {
        let dataset = Dataset::new(vec![Column::new(
            "age",
            ElementKind::Range,
            vec![Value::Range(Bin::new(1.0, 5.0)), Value::Range(Bin::new(6.0, 9.0))],
        )])
        .unwrap();

        let bytes = JsonCodec.write(&dataset).unwrap();
        let reloaded = JsonCodec.read(&bytes).unwrap();
        assert_eq!(reloaded, dataset);
    }
}
