//! Survey record source.
//!
//! Loads a spreadsheet (via calamine) or a CSV file (with encoding and
//! delimiter auto-detection) into [`Record`]s. Nothing survey-specific here:
//! every column is kept, keyed by its header.
//!
//! # Example
//! ```ignore
//! let result = load_records("data.xlsx", None)?;
//! println!("{} rows, columns: {}", result.records.len(), result.headers.join(", "));
//! ```

pub mod csv;
pub mod spreadsheet;

use std::path::Path;

use crate::error::{SourceError, SourceResult};
use crate::models::Record;

pub use self::csv::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes_auto, parse_csv_str,
};
pub use self::spreadsheet::read_spreadsheet;

/// Input file kinds, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Spreadsheet,
    Csv,
}

impl InputFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Spreadsheet),
            "csv" | "tsv" | "txt" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Result of loading with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// One record per non-empty data row
    pub records: Vec<Record>,
    /// Column headers, after empty/duplicate naming
    pub headers: Vec<String>,
    /// Where the rows came from (sheet name, or encoding + delimiter for CSV)
    pub origin: String,
}

/// Load every record of a survey file.
///
/// `sheet` selects a worksheet by name; `None` reads the first one. It is
/// ignored for CSV input.
pub fn load_records(path: impl AsRef<Path>, sheet: Option<&str>) -> SourceResult<ParseResult> {
    let path = path.as_ref();
    match InputFormat::from_path(path) {
        Some(InputFormat::Spreadsheet) => read_spreadsheet(path, sheet),
        Some(InputFormat::Csv) => {
            let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_bytes_auto(&bytes)
        }
        None => Err(SourceError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Name header cells the way sheet-to-JSON exporters do.
///
/// Empty headers become `__EMPTY`, `__EMPTY_1`, ...; a repeated header `X`
/// becomes `X_1`, `X_2`, ...
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut headers: Vec<String> = Vec::new();

    for cell in raw {
        let base = match cell.as_ref() {
            "" => "__EMPTY",
            name => name,
        };

        let mut name = base.to_string();
        let mut suffix = 0;
        while headers.contains(&name) {
            suffix += 1;
            name = format!("{}_{}", base, suffix);
        }
        headers.push(name);
    }

    headers
}

/// Build a record from header names and row cells, skipping empty cells.
///
/// Returns `None` when the row has no non-empty cell.
pub(crate) fn build_record<I>(headers: &[String], cells: I) -> Option<Record>
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut record = Record::new();
    for (header, cell) in headers.iter().zip(cells) {
        if let Some(value) = cell {
            if !value.is_empty() {
                record.insert(header.clone(), value);
            }
        }
    }

    if record.is_empty() {
        None
    } else {
        Some(record)
    }
}
