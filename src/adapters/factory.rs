//! Codec factory
//!
//! Picks the codec implementation for a [`Format`].

use super::delimited::CsvCodec;
use super::json::JsonCodec;
use super::spreadsheet::XlsxCodec;
use super::traits::TableCodec;
use super::Format;

/// Create the codec for `format`
pub fn create_codec(format: Format) -> Box<dyn TableCodec> {
    match format {
        Format::Csv => Box::new(CsvCodec),
        Format::Json => Box::new(JsonCodec),
        Format::Xlsx => Box::new(XlsxCodec),
    }
}
