//! Error handling for the risk index pipeline.

pub mod util;

use std::fmt;
use std::path::PathBuf;

/// Pipeline stage an error was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading and cleaning the income source
    Income,
    /// Reading and aggregating the unemployment sources
    Unemployment,
    /// Joining both panels and computing the index
    RiskIndex,
    /// Writing the final panel to Parquet
    Export,
    /// Reading district boundaries
    Boundaries,
    /// Rendering charts and map
    Presentation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Income => "income",
            Self::Unemployment => "unemployment",
            Self::RiskIndex => "risk index",
            Self::Export => "export",
            Self::Boundaries => "boundaries",
            Self::Presentation => "presentation",
        };
        f.write_str(name)
    }
}

/// Errors raised while loading, transforming and presenting the panels
#[derive(Debug, thiserror::Error)]
pub enum IrsError {
    /// A source file or directory does not exist
    #[error("Source not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// A source could not be decoded or split into columns
    #[error("Source format error in {}: {reason}", .path.display())]
    SourceFormat { path: PathBuf, reason: String },

    /// A mandatory column is absent from a source header
    #[error("Missing column '{column}' in {}", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A period code does not start with a four digit year
    #[error("Malformed period code '{code}'")]
    MalformedPeriod { code: String },

    /// Min-max normalization over a panel whose values are all equal
    #[error("Degenerate range in {panel} panel: every value equals {value}")]
    DegenerateRange { panel: String, value: f64 },

    /// A joined row had no unemployment value for its year
    #[error("Incomplete join for {district} in {year}: no unemployment data")]
    IncompleteJoin { district: String, year: i32 },

    /// A required filter or aggregation produced nothing
    #[error("No data: {what}")]
    NoData { what: String },

    /// A district code outside the fixed set of districts
    #[error("Unknown district '{code}'")]
    UnknownDistrict { code: String },

    /// Any error, tagged with the stage it aborted
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<IrsError>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Record batch conversion error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_arrow::Error),

    /// Chart or map drawing error
    #[error("Render error: {0}")]
    Render(String),
}

impl IrsError {
    /// Create a source format error for a path
    pub fn source_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SourceFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a no-data error
    pub fn no_data(what: impl Into<String>) -> Self {
        Self::NoData { what: what.into() }
    }

    /// Wrap this error with the stage it happened in
    ///
    /// Already tagged errors keep their original stage.
    #[must_use]
    pub fn in_stage(self, stage: Stage) -> Self {
        match self {
            tagged @ Self::Stage { .. } => tagged,
            other => Self::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Stage this error was tagged with, if any
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Attach a pipeline stage to the error side of a result
pub trait StageContext<T> {
    /// Tag the error with `stage`
    fn stage(self, stage: Stage) -> Result<T>;
}

impl<T> StageContext<T> for Result<T> {
    fn stage(self, stage: Stage) -> Result<T> {
        self.map_err(|e| e.in_stage(stage))
    }
}

/// Map a drawing backend error into a render error
pub fn render_error<E: fmt::Display>(error: E) -> IrsError {
    IrsError::Render(error.to_string())
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, IrsError>;
