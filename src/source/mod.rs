//! Reading of the raw statistical sources
//!
//! Both sources are delimiter separated text in a legacy single-byte
//! encoding. A source is decoded in full, leading descriptive lines are
//! skipped, and rows are then handed out lazily as column-name lookups over
//! raw strings. No value is interpreted here.

pub mod boundaries;
pub mod discovery;

use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};

use crate::error::util::read_bytes;
use crate::error::{IrsError, Result};
use crate::utils::logging::log_operation_start;

pub use boundaries::{DistrictBoundaries, DistrictShape, load_boundaries};
pub use discovery::discover_files;

/// Character encoding of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Strict UTF-8, a leading byte order mark is removed
    Utf8,
    /// ISO-8859-1, decoded through its windows-1252 superset
    Latin1,
}

impl Encoding {
    /// Decode raw bytes into text
    ///
    /// # Errors
    /// Returns `SourceFormat` when the bytes are not valid in this encoding.
    pub fn decode(self, bytes: &[u8], path: &Path) -> Result<String> {
        let encoding = match self {
            Self::Utf8 => encoding_rs::UTF_8,
            Self::Latin1 => encoding_rs::WINDOWS_1252,
        };

        let text = encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| {
                IrsError::source_format(path, format!("content is not valid {}", encoding.name()))
            })?;

        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}

/// How to read one delimited source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpec {
    /// Field delimiter
    pub delimiter: u8,
    /// Character encoding
    pub encoding: Encoding,
    /// Number of leading lines to drop before the header row
    pub skip_lines: usize,
}

impl SourceSpec {
    /// Create a new source spec
    #[must_use]
    pub const fn new(delimiter: u8, encoding: Encoding, skip_lines: usize) -> Self {
        Self {
            delimiter,
            encoding,
            skip_lines,
        }
    }
}

/// Clean a header cell: surrounding whitespace and embedded line breaks go
#[must_use]
pub fn clean_column_name(raw: &str) -> String {
    raw.trim().replace(['\n', '\r'], "")
}

/// Drop the first `count` lines of a text
fn skip_lines(text: &str, count: usize) -> &str {
    let mut rest = text;
    for _ in 0..count {
        match rest.find('\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return "",
        }
    }
    rest
}

/// One raw row of a source, addressed by column name
#[derive(Debug, Clone)]
pub struct RawRow {
    columns: Arc<HashMap<String, usize>>,
    record: StringRecord,
}

impl RawRow {
    /// Raw value of a column, `None` when the column is unknown or the row
    /// is shorter than the header
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .get(column)
            .and_then(|&idx| self.record.get(idx))
    }

    /// Raw value of a column with blank values mapped to `None`
    #[must_use]
    pub fn get_present(&self, column: &str) -> Option<&str> {
        self.get(column)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Copy the row into an owned column name to value map
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.columns
            .iter()
            .filter_map(|(name, &idx)| {
                self.record
                    .get(idx)
                    .map(|value| (name.clone(), value.to_string()))
            })
            .collect()
    }
}

/// Lazy sequence of rows from one source file
pub struct SourceRows {
    path: PathBuf,
    headers: Vec<String>,
    columns: Arc<HashMap<String, usize>>,
    records: StringRecordsIntoIter<Cursor<Vec<u8>>>,
}

impl SourceRows {
    /// Path the rows come from
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cleaned header names in file order
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Check that every column is present in the header
    ///
    /// # Errors
    /// Returns `MissingColumn` for the first absent column.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        match columns.iter().find(|c| !self.columns.contains_key(**c)) {
            Some(missing) => Err(IrsError::MissingColumn {
                path: self.path.clone(),
                column: (*missing).to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Iterator for SourceRows {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map(|record| RawRow {
                    columns: Arc::clone(&self.columns),
                    record,
                })
                .map_err(|e| IrsError::source_format(&self.path, e.to_string())),
        )
    }
}

/// Open a delimited source and return its rows
///
/// # Arguments
/// * `path` - Source file
/// * `spec` - Delimiter, encoding and leading lines to skip
///
/// # Errors
/// `SourceNotFound` when the file does not exist, `SourceFormat` when it
/// cannot be decoded or has no header row.
pub fn read_source(path: &Path, spec: &SourceSpec) -> Result<SourceRows> {
    log_operation_start("Reading source", path);

    let bytes = read_bytes(path, "reading delimited source")?;
    let text = spec.encoding.decode(&bytes, path)?;
    let body = skip_lines(&text, spec.skip_lines);

    let mut reader = ReaderBuilder::new()
        .delimiter(spec.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(body.as_bytes().to_vec()));

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IrsError::source_format(path, e.to_string()))?
        .iter()
        .map(clean_column_name)
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(IrsError::source_format(path, "no header row"));
    }

    let mut columns = HashMap::with_capacity(headers.len());
    for (idx, name) in headers.iter().enumerate() {
        columns.entry(name.clone()).or_insert(idx);
    }

    log::debug!("{} columns in {}: {:?}", headers.len(), path.display(), headers);

    Ok(SourceRows {
        path: path.to_path_buf(),
        headers,
        columns: Arc::new(columns),
        records: reader.into_records(),
    })
}
