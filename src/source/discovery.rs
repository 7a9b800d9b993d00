//! Discovery of period-stamped source files
//!
//! Unemployment data arrives as one file per reporting period
//! (`Paro_por_municipios_2021.csv`, ...). Files are processed in ascending
//! file name order.

use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::util::validate_directory;
use crate::error::{IrsError, Result};
use crate::utils::logging::{log_operation_start, log_warning};

/// Find every file in `dir` matching a glob `pattern`
///
/// # Arguments
/// * `dir` - Directory to search (not recursive)
/// * `pattern` - File name glob, e.g. `Paro_por_municipios_*.csv`
///
/// # Returns
/// Matching files sorted by file name. An empty result is not an error.
///
/// # Errors
/// `SourceNotFound` when `dir` does not exist, `SourceFormat` when the
/// pattern is invalid.
pub fn discover_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    log_operation_start("Searching for source files in", dir);
    validate_directory(dir, "source file discovery")?;

    let dir_text = dir
        .to_str()
        .ok_or_else(|| IrsError::source_format(dir, "directory path is not valid UTF-8"))?;
    let full_pattern = format!("{}/{}", Pattern::escape(dir_text), pattern);

    let entries = glob::glob(&full_pattern)
        .map_err(|e| IrsError::source_format(dir, format!("invalid pattern '{pattern}': {e}")))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| IrsError::Io(e.into()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if files.is_empty() {
        log_warning(&format!("No files matching '{pattern}'"), Some(dir));
    } else {
        log::info!("Found {} files matching '{}'", files.len(), pattern);
    }

    Ok(files)
}
