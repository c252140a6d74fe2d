//! Spreadsheet workbooks (xlsx, xls, xlsb, ods) via calamine.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::{build_record, normalize_headers, ParseResult};
use crate::error::{SourceError, SourceResult};

/// Read one worksheet into records.
///
/// The first row of the used range is the header row. `sheet` selects a
/// worksheet by name; `None` reads the first one. Text cells are kept
/// verbatim.
pub fn read_spreadsheet(path: &Path, sheet: Option<&str>) -> SourceResult<ParseResult> {
    if !path.exists() {
        return Err(SourceError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    }

    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SourceError::SheetNotFound("workbook has no sheets".to_string()))?,
    };

    if !workbook.sheet_names().contains(&sheet_name) {
        return Err(SourceError::SheetNotFound(sheet_name));
    }

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let header_row = rows.next().ok_or(SourceError::NoHeaders)?;
    let headers = normalize_headers(header_row.iter().map(cell_text));

    let records = rows
        .filter_map(|row| build_record(&headers, row.iter().map(cell_value)))
        .collect();

    Ok(ParseResult {
        records,
        headers,
        origin: format!("sheet '{}'", sheet_name),
    })
}

/// Display text of a cell; integral floats print without a fractional part.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        other => Some(cell_text(other)),
    }
}
