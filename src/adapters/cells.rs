//! Cell parsing and column assembly shared by the codecs

use crate::domain::{Column, ElementKind, Value};
use std::collections::HashSet;

/// Text markers read as missing values
pub const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parse one text cell into the narrowest value it represents
pub fn parse_cell(raw: &str) -> Value {
    if NULL_MARKERS.contains(&raw) {
        return Value::Null;
    }
    match raw {
        "True" | "true" | "TRUE" => return Value::Bool(true),
        "False" | "false" | "FALSE" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_nan() => Value::Null,
        Ok(f) => Value::Float(f),
        Err(_) => Value::Text(raw.to_string()),
    }
}

/// Build a column from raw text cells
///
/// The kind is inferred from the parsed cells. Text columns keep the raw text
/// of every non-null cell, so `"007"` stays `"007"` next to words.
pub fn column_from_text(name: impl Into<String>, raw: Vec<String>) -> Column {
    let parsed: Vec<Value> = raw.iter().map(|cell| parse_cell(cell)).collect();
    if ElementKind::infer(&parsed) != ElementKind::Text {
        return Column::infer(name, parsed);
    }
    let values = raw
        .into_iter()
        .zip(parsed)
        .map(|(cell, value)| if value.is_null() { Value::Null } else { Value::Text(cell) })
        .collect();
    Column::new(name, ElementKind::Text, values)
}

/// Make header names unique by suffixing repeats with `.1`, `.2`, ...
///
/// Blank headers become `Unnamed: <index>`.
pub fn unique_headers(headers: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(index, header)| {
            let base = if header.is_empty() {
                format!("Unnamed: {index}")
            } else {
                header
            };
            let mut name = base.clone();
            let mut n = 1;
            while !seen.insert(name.clone()) {
                name = format!("{base}.{n}");
                n += 1;
            }
            name
        })
        .collect()
}

/// Float rendering that keeps integral values recognisable as floats
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
