//! Excel workbook codec
//!
//! Reads the first worksheet with its first row as the header, and writes a
//! single worksheet. Bins are written as `(min, max)` text, nulls as blank
//! cells.

use super::cells::unique_headers;
use super::traits::{CodecError, TableCodec};
use super::Format;
use crate::domain::{Column, Dataset, Value};
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::io::Cursor;

/// `.xlsx` workbooks
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxCodec;

impl TableCodec for XlsxCodec {
    fn format(&self) -> Format {
        Format::Xlsx
    }

    fn read(&self, bytes: &[u8]) -> Result<Dataset, CodecError> {
        let mut workbook: Xlsx<Cursor<&[u8]>> = open_workbook_from_rs(Cursor::new(bytes))
            .map_err(|e: calamine::XlsxError| CodecError::Spreadsheet(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| CodecError::Shape("workbook has no worksheets".to_string()))?
            .map_err(|e| CodecError::Spreadsheet(e.to_string()))?;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(Dataset::default());
        };
        let names = unique_headers(header.iter().map(header_text));

        let mut cells: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
        for row in rows {
            for (column, cell) in cells.iter_mut().zip(row) {
                column.push(from_cell(cell));
            }
        }

        let columns = names
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column::infer(name, values))
            .collect();
        Ok(Dataset::new(columns)?)
    }

    fn write(&self, dataset: &Dataset) -> Result<Vec<u8>, CodecError> {
        write_workbook(dataset).map_err(|e| CodecError::Spreadsheet(e.to_string()))
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

fn from_cell(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::Int(i) => Value::Int(*i),
        // Spreadsheets store every number as a float
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Value::Int(*f as i64),
        Data::Float(f) if f.is_nan() => Value::Null,
        Data::Float(f) => Value::Float(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::Text(s.clone()),
        other => Value::Text(other.to_string()),
    }
}

fn write_workbook(dataset: &Dataset) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, column) in dataset.columns().iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)?;
        worksheet.write_string(0, col, column.name())?;

        for (row, value) in column.values().iter().enumerate() {
            let row = u32::try_from(row + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            match value {
                Value::Null => {}
                Value::Bool(b) => {
                    worksheet.write_boolean(row, col, *b)?;
                }
                Value::Int(i) => {
                    worksheet.write_number(row, col, *i as f64)?;
                }
                Value::Float(f) if !f.is_finite() => {}
                Value::Float(f) => {
                    worksheet.write_number(row, col, *f)?;
                }
                Value::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                Value::Range(bin) => {
                    worksheet.write_string(row, col, bin.to_string())?;
                }
            }
        }
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bin, ElementKind};

    fn sample() -> Dataset {
        Dataset::new(vec![
            Column::text("city", ["Oslo", "Rome", "Lima"]),
            Column::new(
                "age",
                ElementKind::NullableInteger,
                vec![Value::Int(36), Value::Null, Value::Int(29)],
            ),
            Column::floats("score", [1.5, 2.25, 3.0]),
            Column::new(
                "income",
                ElementKind::Range,
                vec![
                    Value::Range(Bin::new(10.0, 20.0)),
                    Value::Range(Bin::new(10.0, 20.0)),
                    Value::Null,
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_write_then_read() {
        let bytes = XlsxCodec.write(&sample()).unwrap();
        let dataset = XlsxCodec.read(&bytes).unwrap();

        assert_eq!(dataset.column_names(), vec!["city", "age", "score", "income"]);
        assert_eq!(dataset.height(), 3);

        let age = dataset.column("age").unwrap();
        assert_eq!(age.kind(), ElementKind::NullableInteger);
        assert_eq!(age.values(), &[Value::Int(36), Value::Null, Value::Int(29)]);

        // Integral spreadsheet numbers read back as integers
        let score = dataset.column("score").unwrap();
        assert_eq!(score.kind(), ElementKind::Float);
        assert_eq!(score.get(2), Some(&Value::Float(3.0)));

        let income = dataset.column("income").unwrap();
        assert_eq!(income.kind(), ElementKind::Text);
        assert_eq!(income.get(0), Some(&Value::from("(10, 20)")));
        assert_eq!(income.get(2), Some(&Value::Null));
    }

    #[test]
    fn test_read_garbage_fails() {
        let err = XlsxCodec.read(b"not a workbook").unwrap_err();
        assert!(matches!(err, CodecError::Spreadsheet(_)));
    }
}
