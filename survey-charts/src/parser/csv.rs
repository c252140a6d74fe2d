//! CSV survey exports with encoding and delimiter auto-detection.

use super::{build_record, normalize_headers, ParseResult};
use crate::error::{SourceError, SourceResult};
use crate::models::Record;

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "iso-8859-9" | "windows-1254" | "cp1254" => "windows-1254".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Unknown encodings fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> SourceResult<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => Ok(String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).to_string())),
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.to_string())
        }
        // Turkish exports
        "windows-1254" | "iso-8859-9" => {
            let (text, _, had_errors) = encoding_rs::WINDOWS_1254.decode(bytes);
            if had_errors {
                return Err(SourceError::Encoding { encoding: encoding.to_string() });
            }
            Ok(text.to_string())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string()),
        _ => Ok(String::from_utf8_lossy(bytes).to_string()),
    }
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ';';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text with an explicit delimiter.
///
/// The first line is the header row. Quoted fields may contain the delimiter
/// and line breaks; rows may be shorter or longer than the header. Headers
/// and cells are kept verbatim, surrounding whitespace included, the same
/// way spreadsheet cells are.
pub fn parse_csv_str(content: &str, delimiter: char) -> SourceResult<(Vec<String>, Vec<Record>)> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let raw_headers = reader.headers().map_err(csv_error)?.clone();
    if raw_headers.is_empty() {
        return Err(SourceError::NoHeaders);
    }
    let headers = normalize_headers(raw_headers.iter());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        let cells = row.iter().map(|cell| Some(cell.to_string()));
        if let Some(record) = build_record(&headers, cells) {
            records.push(record);
        }
    }

    Ok((headers, records))
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> SourceResult<ParseResult> {
    // Valid UTF-8 needs no guessing
    let encoding = match std::str::from_utf8(bytes) {
        Ok(_) => "utf-8".to_string(),
        Err(_) => detect_encoding(bytes),
    };
    let content = decode_content(bytes, &encoding)?;
    if content.trim().is_empty() {
        return Err(SourceError::NoHeaders);
    }

    let delimiter = detect_delimiter(&content);
    let (headers, records) = parse_csv_str(&content, delimiter)?;

    Ok(ParseResult {
        records,
        headers,
        origin: format!("csv ({}, '{}')", encoding, format_delimiter(delimiter)),
    })
}

fn csv_error(err: ::csv::Error) -> SourceError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    SourceError::Csv { line, message: err.to_string() }
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
