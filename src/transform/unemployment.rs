//! Unemployment transform: monthly municipal files to a yearly panel
//!
//! Each reporting file lists registered unemployment for every municipality
//! in the country, one row per municipality and month. Files are reduced
//! independently to yearly means for the target municipality, then
//! concatenated, filtered to the analysis window and normalized.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use crate::config::UnemploymentSourceConfig;
use crate::error::{IrsError, Result};
use crate::models::{UnemploymentPanel, UnemploymentRecord};
use crate::source::{RawRow, discover_files, read_source};
use crate::transform::normalize::min_max;
use crate::transform::numeric::{mean, parse_number};
use crate::utils::logging::{
    create_file_progress_bar, finish_progress_bar, log_operation_complete, log_warning,
};

/// Yearly means extracted from one file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearlyUnemployment {
    /// Mean monthly total per year
    pub by_year: BTreeMap<i32, f64>,
    /// Matching rows whose total was not numeric
    pub dropped_values: usize,
}

/// Derive the year from a `YYYYMM` period code
///
/// # Errors
/// `MalformedPeriod` when the code does not start with four digits.
pub fn derive_year(code: &str) -> Result<i32> {
    let trimmed = code.trim();
    let prefix: String = trimmed.chars().take(4).collect();
    if prefix.len() < 4 || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return Err(IrsError::MalformedPeriod {
            code: trimmed.to_string(),
        });
    }
    prefix.parse::<i32>().map_err(|_| IrsError::MalformedPeriod {
        code: trimmed.to_string(),
    })
}

/// Uppercase and trim a place name for comparison
#[must_use]
pub fn normalize_place(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Reduce one file's rows to yearly means for the target municipality
///
/// # Errors
/// Propagates row read errors and `MalformedPeriod` from matching rows.
pub fn aggregate_rows<I>(rows: I, config: &UnemploymentSourceConfig) -> Result<YearlyUnemployment>
where
    I: IntoIterator<Item = Result<RawRow>>,
{
    let province = normalize_place(&config.province);
    let municipality = normalize_place(&config.municipality);

    let mut monthly: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    let mut dropped_values = 0;

    for row in rows {
        let row = row?;
        let row_province = row.get(&config.province_column).map(normalize_place);
        let row_municipality = row.get(&config.municipality_column).map(normalize_place);
        if row_province.as_deref() != Some(province.as_str())
            || row_municipality.as_deref() != Some(municipality.as_str())
        {
            continue;
        }

        let year = derive_year(row.get(&config.period_column).unwrap_or_default())?;

        match row.get(&config.value_column).and_then(parse_number) {
            Some(value) => monthly.entry(year).or_default().push(value),
            None => dropped_values += 1,
        }
    }

    let by_year = monthly
        .into_iter()
        .filter_map(|(year, values)| mean(&values).map(|m| (year, m)))
        .collect();

    Ok(YearlyUnemployment {
        by_year,
        dropped_values,
    })
}

/// Read one unemployment file
fn aggregate_file(path: &Path, config: &UnemploymentSourceConfig) -> Result<YearlyUnemployment> {
    let rows = read_source(path, &config.spec)?;
    rows.require_columns(&config.required_columns())?;
    aggregate_rows(rows, config)
}

/// Concatenate per-file results into one value per year
///
/// A year reported by more than one file gets the mean of the per-file
/// values.
#[must_use]
pub fn combine_yearly(parts: &[YearlyUnemployment]) -> BTreeMap<i32, f64> {
    let mut per_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for part in parts {
        for (&year, &value) in &part.by_year {
            per_year.entry(year).or_default().push(value);
        }
    }

    per_year
        .into_iter()
        .filter_map(|(year, values)| {
            if values.len() > 1 {
                log_warning(
                    &format!(
                        "Year {year} reported by {} files, averaging their yearly means",
                        values.len()
                    ),
                    None,
                );
            }
            mean(&values).map(|m| (year, m))
        })
        .collect()
}

/// Filter combined yearly values to the window and normalize them
///
/// # Errors
/// `NoData` when no year falls in the window, `DegenerateRange` when every
/// remaining year has the same total.
pub fn normalize_unemployment(
    yearly: &BTreeMap<i32, f64>,
    config: &UnemploymentSourceConfig,
) -> Result<Vec<UnemploymentRecord>> {
    let in_window: Vec<(i32, f64)> = yearly
        .iter()
        .filter(|(year, _)| config.years.contains(**year))
        .map(|(&year, &total)| (year, total))
        .collect();

    if in_window.is_empty() {
        return Err(IrsError::no_data(format!(
            "no unemployment records for {} {} in {}",
            config.province, config.municipality, config.years
        )));
    }

    let totals: Vec<f64> = in_window.iter().map(|(_, total)| *total).collect();
    let normalized = min_max("unemployment", &totals)?;

    Ok(in_window
        .into_iter()
        .zip(normalized.values)
        .map(|((year, unemployment_total), unemployment_norm)| UnemploymentRecord {
            year,
            unemployment_total,
            unemployment_norm,
        })
        .collect())
}

/// Discover, read and aggregate every unemployment file
///
/// # Errors
/// `SourceNotFound` when the directory is missing, source errors for any
/// unreadable file, `MalformedPeriod` for a bad period code, and the errors
/// of [`normalize_unemployment`].
pub fn load_unemployment_panel(config: &UnemploymentSourceConfig) -> Result<UnemploymentPanel> {
    let start = Instant::now();
    let files = discover_files(&config.directory, &config.file_pattern)?;

    let pb = create_file_progress_bar(files.len() as u64, Some("unemployment files"));
    let mut parts = Vec::with_capacity(files.len());
    for path in &files {
        let part = aggregate_file(path, config)?;
        log::debug!(
            "{}: {} years, {} dropped values",
            path.display(),
            part.by_year.len(),
            part.dropped_values
        );
        parts.push(part);
        pb.inc(1);
    }
    finish_progress_bar(&pb, Some("unemployment files read"));

    let dropped_values = parts.iter().map(|p| p.dropped_values).sum();
    let yearly = combine_yearly(&parts);
    let records = normalize_unemployment(&yearly, config)?;

    log_operation_complete(
        "built unemployment panel with",
        &config.directory,
        records.len(),
        dropped_values,
        Some(start.elapsed()),
    );

    Ok(UnemploymentPanel {
        records,
        dropped_values,
        files_read: files.len(),
    })
}
