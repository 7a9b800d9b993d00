//! Arrow/Parquet export of the final risk panel
//!
//! The panel is written with an explicit schema so the file layout does not
//! depend on sample tracing:
//!
//! | column        | type    | nullable |
//! |---------------|---------|----------|
//! | `district`    | Utf8    | no       |
//! | `year`        | Int32   | no       |
//! | `irs`         | Float64 | no       |
//! | `irs_prev`    | Float64 | yes      |
//! | `irs_var_pct` | Float64 | yes      |
//! | `alert_level` | Utf8    | no       |

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::datatypes::{DataType, Field, FieldRef, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::error::util::safe_open_file;
use crate::error::{IrsError, Result};
use crate::models::{AlertLevel, RiskIndexRecord, RiskPanel};
use crate::utils::logging::{log_operation_complete, log_operation_start};

#[derive(Serialize)]
struct RiskRow<'a> {
    district: &'a str,
    year: i32,
    irs: f64,
    irs_prev: Option<f64>,
    irs_var_pct: Option<f64>,
    alert_level: &'a str,
}

impl<'a> From<&'a RiskIndexRecord> for RiskRow<'a> {
    fn from(record: &'a RiskIndexRecord) -> Self {
        Self {
            district: &record.district,
            year: record.year,
            irs: record.irs,
            irs_prev: record.irs_prev,
            irs_var_pct: record.irs_var_pct,
            alert_level: record.alert_level.as_str(),
        }
    }
}

#[derive(Deserialize)]
struct StoredRiskRow {
    district: String,
    year: i32,
    irs: f64,
    irs_prev: Option<f64>,
    irs_var_pct: Option<f64>,
    alert_level: String,
}

impl StoredRiskRow {
    fn into_record(self, path: &Path) -> Result<RiskIndexRecord> {
        let alert_level = match self.alert_level.as_str() {
            "OK" => AlertLevel::Ok,
            "RED" => AlertLevel::Red,
            other => {
                return Err(IrsError::source_format(
                    path,
                    format!(
                        "unknown alert level '{other}' for {} {}",
                        self.district, self.year
                    ),
                ));
            }
        };
        Ok(RiskIndexRecord {
            district: self.district,
            year: self.year,
            irs: self.irs,
            irs_prev: self.irs_prev,
            irs_var_pct: self.irs_var_pct,
            alert_level,
        })
    }
}

/// Arrow schema of the exported panel
#[must_use]
pub fn risk_panel_schema() -> Schema {
    Schema::new(vec![
        Field::new("district", DataType::Utf8, false),
        Field::new("year", DataType::Int32, false),
        Field::new("irs", DataType::Float64, false),
        Field::new("irs_prev", DataType::Float64, true),
        Field::new("irs_var_pct", DataType::Float64, true),
        Field::new("alert_level", DataType::Utf8, false),
    ])
}

/// Convert the panel into a single record batch
///
/// # Errors
/// `Serialization` if a record does not fit the schema.
pub fn to_record_batch(panel: &RiskPanel) -> Result<RecordBatch> {
    let fields: Vec<FieldRef> = risk_panel_schema()
        .fields()
        .iter()
        .map(Arc::clone)
        .collect();
    let rows: Vec<RiskRow<'_>> = panel.records.iter().map(RiskRow::from).collect();
    Ok(serde_arrow::to_record_batch(&fields, &rows)?)
}

/// Write the panel to a Parquet file, creating parent directories
///
/// # Errors
/// `Io` when the file cannot be created, `Serialization`/`Parquet` when
/// conversion or writing fails.
pub fn write_risk_panel(panel: &RiskPanel, path: &Path) -> Result<()> {
    let start = Instant::now();
    log_operation_start("Writing risk panel", path);

    let batch = to_record_batch(panel)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    log_operation_complete(
        "wrote",
        path,
        batch.num_rows(),
        0,
        Some(start.elapsed()),
    );
    Ok(())
}

/// Read the record batches of an exported panel
///
/// # Errors
/// `SourceNotFound` when the file is missing, `Parquet`/`Arrow` when it
/// cannot be read.
pub fn read_risk_panel(path: &Path) -> Result<Vec<RecordBatch>> {
    let file = safe_open_file(path, "reading risk panel")?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch?);
    }
    Ok(batches)
}

/// Read an exported panel back into records
///
/// # Errors
/// See [`read_risk_panel`]; `Serialization` when a batch does not match the
/// panel schema.
pub fn read_risk_records(path: &Path) -> Result<Vec<RiskIndexRecord>> {
    let mut records = Vec::new();
    for batch in read_risk_panel(path)? {
        let rows: Vec<StoredRiskRow> = serde_arrow::from_record_batch(&batch)?;
        for row in rows {
            records.push(row.into_record(path)?);
        }
    }
    Ok(records)
}
