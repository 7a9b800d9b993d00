//! Utility functions for error handling
//!
//! This module provides file helpers that turn filesystem failures into
//! source errors carrying the offending path.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{IrsError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
///
/// # Returns
/// * `Result<fs::File>` - The opened file or a detailed error
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        log::error!("File needed for {purpose} not found: {}", path.display());
        return Err(IrsError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    if !path.is_file() {
        return Err(IrsError::source_format(
            path,
            format!("expected a file for {purpose}"),
        ));
    }

    match fs::File::open(path) {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(IrsError::SourceNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => {
            log::error!("Failed to open {} for {purpose}: {e}", path.display());
            Err(IrsError::Io(e))
        }
    }
}

/// Read the whole file into memory
pub fn read_bytes(path: &Path, purpose: &str) -> Result<Vec<u8>> {
    let mut file = safe_open_file(path, purpose)?;
    let mut content = Vec::new();
    io::Read::read_to_end(&mut file, &mut content)?;
    Ok(content)
}

/// Check if a directory exists and is readable, with rich error information
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        log::error!("Directory needed for {purpose} not found: {}", path.display());
        return Err(IrsError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    if !path.is_dir() {
        return Err(IrsError::source_format(
            path,
            format!("expected a directory for {purpose}"),
        ));
    }

    fs::read_dir(path).map(|_| ()).map_err(IrsError::Io)
}
