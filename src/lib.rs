//! A Rust library for computing a district-level Social Risk Index (IRS)
//! from income and unemployment statistics, with year-over-year alerts,
//! Parquet export and SVG charts.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod presentation;
pub mod report;
pub mod source;
pub mod transform;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::PipelineConfig;
pub use error::{IrsError, Result, Stage};
pub use models::{AlertLevel, District, IncompleteJoin, RiskIndexRecord, RiskPanel};
pub use report::RunReport;

// Pipeline entry points
pub use pipeline::{PipelineOutput, compute_panels, run, run_with};

// Presentation
pub use presentation::{PresentationAdapter, SvgPresenter};

// Arrow types
pub use arrow::record_batch::RecordBatch;
