//! CSV codec

use super::cells::{column_from_text, format_float, unique_headers};
use super::traits::{CodecError, TableCodec};
use super::Format;
use crate::domain::{Dataset, Value};

/// Comma separated values with a header row
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCodec;

impl TableCodec for CsvCodec {
    fn format(&self) -> Format {
        Format::Csv
    }

    fn read(&self, bytes: &[u8]) -> Result<Dataset, CodecError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);

        let headers = unique_headers(reader.headers()?.iter().map(str::to_string));
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

        for record in reader.records() {
            let record = record?;
            for (column, field) in cells.iter_mut().zip(record.iter()) {
                column.push(field.to_string());
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, raw)| column_from_text(name, raw))
            .collect();
        Ok(Dataset::new(columns)?)
    }

    fn write(&self, dataset: &Dataset) -> Result<Vec<u8>, CodecError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(dataset.column_names())?;

        for row in dataset.rows() {
            writer.write_record(row.iter().map(|value| render(value)))?;
        }

        writer
            .into_inner()
            .map_err(|e| CodecError::Shape(e.to_string()))
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::Float(f) if f.is_nan() => String::new(),
        Value::Float(f) => format_float(*f),
        other => other.to_string(),
    }
}
