//! Delimited-text loader with delimiter detection.
//!
//! Movement logs arrive as spreadsheet exports, usually `;`-separated with a
//! UTF-8 byte-order mark. The loader returns raw string cells and leaves all
//! typing to the normalizer.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use crate::error::{FlightcheckError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b';', b'\t', b',', b'|'];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

impl ParserConfig {
    /// Reject settings the loader cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.max_rows == Some(0) {
            return Err(FlightcheckError::Config(
                "max_rows must be greater than zero".to_string(),
            ));
        }
        if let Some(d) = self.delimiter {
            if d == self.quote || d == b'\n' || d == b'\r' {
                return Err(FlightcheckError::InvalidDelimiter(format!(
                    "{:?} cannot be used as a delimiter",
                    d as char
                )));
            }
        }
        Ok(())
    }
}

/// Parse a user-supplied delimiter name or character.
///
/// Accepts a single ASCII character or one of `tab`, `comma`, `semicolon`,
/// `pipe`.
pub fn parse_delimiter(value: &str) -> Result<u8> {
    match value.to_lowercase().as_str() {
        "tab" | "\\t" => Ok(b'\t'),
        "comma" => Ok(b','),
        "semicolon" => Ok(b';'),
        "pipe" => Ok(b'|'),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() && !c.is_ascii_alphanumeric() => Ok(c as u8),
                _ => Err(FlightcheckError::InvalidDelimiter(value.to_string())),
            }
        }
    }
}

/// Parses tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        self.config.validate()?;

        let io_err = |e| FlightcheckError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let data_table = self.parse_bytes(&contents)?;

        let format = match data_table.delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            data_table.row_count(),
            data_table.column_count(),
        );

        tracing::debug!(
            file = %source_metadata.file,
            rows = source_metadata.row_count,
            columns = source_metadata.column_count,
            format = %source_metadata.format,
            "loaded table"
        );

        Ok((data_table, source_metadata))
    }

    /// Parse in-memory bytes, detecting the delimiter unless configured.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.byte_records();

        let headers: Vec<String> = match records.next() {
            Some(Ok(first)) if self.config.has_header => {
                decode_record(&first).into_iter().map(|s| s.trim().to_string()).collect()
            }
            Some(Ok(first)) => {
                let names = (0..first.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect();
                // Headerless input: the first record is data.
                let mut rows = vec![decode_record(&first)];
                return self.collect_rows(names, &mut rows, records, delimiter);
            }
            Some(Err(e)) => return Err(e.into()),
            None => return Err(FlightcheckError::EmptyData("No header row found".to_string())),
        };

        if headers.iter().all(|h| h.is_empty()) {
            return Err(FlightcheckError::EmptyData("No columns found".to_string()));
        }

        self.collect_rows(headers, &mut Vec::new(), records, delimiter)
    }

    fn collect_rows(
        &self,
        headers: Vec<String>,
        rows: &mut Vec<Vec<String>>,
        records: csv::ByteRecordsIter<'_, &[u8]>,
        delimiter: u8,
    ) -> Result<DataTable> {
        let expected_cols = headers.len();

        for result in records {
            if let Some(max) = self.config.max_rows {
                if rows.len() >= max {
                    break;
                }
            }

            let record = result?;
            let mut row = decode_record(&record);

            // Spreadsheet exports pad trailing rows with empty separators.
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            row.resize(expected_cols, String::new());
            rows.push(row);
        }

        if rows.is_empty() {
            tracing::debug!(columns = expected_cols, "table has a header but no data rows");
        }

        Ok(DataTable::new(headers, std::mem::take(rows), delimiter))
    }
}

/// Decode every field of a record, replacing bytes that are not UTF-8.
///
/// Spreadsheet exports are often Windows-1252; a stray accented byte must
/// not make the whole file unreadable.
fn decode_record(record: &csv::ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = bytes
        .split(|&b| b == b'\n')
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .filter(|l| !l.trim().is_empty())
        .take(10)
        .collect();

    if lines.is_empty() {
        return Err(FlightcheckError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; ties keep the earlier delimiter.
        let score = if consistent {
            first_count * 1000
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
