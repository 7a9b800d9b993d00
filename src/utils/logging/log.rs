//! Logging utilities
//!
//! Standardized log lines for reading and cleaning sources, so every stage
//! reports the same way.

use std::path::Path;
use std::time::Duration;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory that was operated on
/// * `kept` - Number of rows retained
/// * `dropped` - Number of rows discarded as missing data
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    kept: usize,
    dropped: usize,
    elapsed: Option<Duration>,
) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {} {} rows ({} dropped) from {} in {:?}",
            operation,
            kept,
            dropped,
            path.display(),
            duration
        ),
        None => log::info!(
            "Successfully {} {} rows ({} dropped) from {}",
            operation,
            kept,
            dropped,
            path.display()
        ),
    }
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `path` - Optional path related to the warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}
