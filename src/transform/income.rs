//! Income transform: district income rows to a normalized risk panel
//!
//! The income table mixes municipality totals (blank district), every
//! indicator the statistics office publishes and every year on record. This
//! module narrows it to one median income per district and year and turns
//! that into a risk value where lower income means higher risk.

use std::collections::BTreeMap;
use std::time::Instant;

use regex::Regex;

use crate::config::IncomeSourceConfig;
use crate::error::{IrsError, Result};
use crate::models::{District, IncomePanel, IncomeRecord, IncomeRiskRecord};
use crate::source::{RawRow, read_source};
use crate::transform::normalize::min_max;
use crate::transform::numeric::{median, parse_locale_decimal};
use crate::utils::logging::{log_operation_complete, log_warning};

/// Income rows that survived the filters
#[derive(Debug, Clone, Default)]
pub struct IncomeSelection {
    /// Selected rows with a usable value
    pub records: Vec<IncomeRecord>,
    /// Selected rows whose value was missing, unparseable or negative
    pub dropped_values: usize,
}

/// Column lookups and compiled filters for one income source
struct IncomeFilter<'a> {
    config: &'a IncomeSourceConfig,
    municipality: Regex,
}

impl<'a> IncomeFilter<'a> {
    fn new(config: &'a IncomeSourceConfig) -> Result<Self> {
        let municipality = Regex::new(&config.municipality.regex_source()).map_err(|e| {
            IrsError::source_format(&config.path, format!("invalid municipality pattern: {e}"))
        })?;
        Ok(Self {
            config,
            municipality,
        })
    }

    /// District label of a row inside the target municipality, `None` for
    /// other municipalities and for municipality-level rows (blank district)
    fn district<'r>(&self, row: &'r RawRow) -> Option<&'r str> {
        let municipality = row.get(&self.config.municipality_column)?;
        if !self.municipality.is_match(municipality) {
            return None;
        }
        row.get_present(&self.config.district_column)
    }

    fn is_target_indicator(&self, row: &RawRow) -> bool {
        row.get(&self.config.indicator_column)
            .is_some_and(|indicator| indicator.trim() == self.config.indicator)
    }

    fn year(&self, row: &RawRow) -> Result<i32> {
        let raw = row.get(&self.config.period_column).unwrap_or_default().trim();
        raw.parse::<i32>().map_err(|_| IrsError::MalformedPeriod {
            code: raw.to_string(),
        })
    }
}

/// Keep the target municipality's district rows for the configured
/// indicator and years, parsing their values
///
/// # Errors
/// Propagates row read errors, `MalformedPeriod` when a selected row's
/// period is not an integer year and `UnknownDistrict` when its district
/// label is not one of the eleven districts.
pub fn select_income_rows<I>(rows: I, config: &IncomeSourceConfig) -> Result<IncomeSelection>
where
    I: IntoIterator<Item = Result<RawRow>>,
{
    let filter = IncomeFilter::new(config)?;
    let mut selection = IncomeSelection::default();

    for row in rows {
        let row = row?;
        let Some(district) = filter.district(&row) else {
            continue;
        };
        if !filter.is_target_indicator(&row) {
            continue;
        }
        let year = filter.year(&row)?;
        if !config.years.contains(year) {
            continue;
        }
        District::from_label(district)?;

        match row
            .get(&config.value_column)
            .and_then(parse_locale_decimal)
            .filter(|v| *v >= 0.0)
        {
            Some(value) => selection
                .records
                .push(IncomeRecord::new(district, year, value)),
            None => selection.dropped_values += 1,
        }
    }

    Ok(selection)
}

/// Reduce the selection to one record per (district, year)
///
/// Duplicates collapse to their median. The result is ordered by district,
/// then year. Also returns how many rows were merged away.
#[must_use]
pub fn collapse_duplicates(records: Vec<IncomeRecord>) -> (Vec<IncomeRecord>, usize) {
    let total = records.len();
    let mut groups: BTreeMap<(String, i32), Vec<f64>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.district, record.year))
            .or_default()
            .push(record.median_income);
    }

    let collapsed: Vec<IncomeRecord> = groups
        .into_iter()
        .filter_map(|((district, year), values)| {
            median(&values).map(|value| IncomeRecord::new(district, year, value))
        })
        .collect();

    let merged = total - collapsed.len();
    (collapsed, merged)
}

/// Attach the panel-wide min-max position and risk to each record
///
/// # Errors
/// `NoData` for an empty panel, `DegenerateRange` when every income is equal.
pub fn normalize_income(records: Vec<IncomeRecord>) -> Result<Vec<IncomeRiskRecord>> {
    let values: Vec<f64> = records.iter().map(|r| r.median_income).collect();
    let normalized = min_max("income", &values)?;

    log::debug!(
        "Income range {:.2} - {:.2} over {} records",
        normalized.min,
        normalized.max,
        values.len()
    );

    Ok(records
        .into_iter()
        .zip(normalized.values)
        .map(|(record, norm)| IncomeRiskRecord::from_record(record, norm))
        .collect())
}

/// Build the income panel from already-read rows
///
/// # Errors
/// See [`select_income_rows`] and [`normalize_income`].
pub fn build_income_panel<I>(rows: I, config: &IncomeSourceConfig) -> Result<IncomePanel>
where
    I: IntoIterator<Item = Result<RawRow>>,
{
    let selection = select_income_rows(rows, config)?;
    let dropped_values = selection.dropped_values;

    let (records, collapsed_duplicates) = collapse_duplicates(selection.records);
    if collapsed_duplicates > 0 {
        log::info!("Collapsed {collapsed_duplicates} duplicate income rows by median");
    }

    let records = normalize_income(records)?;

    let expected = config.expected_districts * config.years.len();
    if records.len() != expected {
        log_warning(
            &format!(
                "Income panel has {} rows, expected {} ({} districts x {} years)",
                records.len(),
                expected,
                config.expected_districts,
                config.years.len()
            ),
            Some(&config.path),
        );
    }

    Ok(IncomePanel {
        records,
        dropped_values,
        collapsed_duplicates,
    })
}

/// Read the income source and build its panel
///
/// # Errors
/// `SourceNotFound`, `SourceFormat` or `MissingColumn` for an unusable
/// source, plus everything [`build_income_panel`] returns.
pub fn load_income_panel(config: &IncomeSourceConfig) -> Result<IncomePanel> {
    let start = Instant::now();

    let rows = read_source(&config.path, &config.spec)?;
    rows.require_columns(&config.required_columns())?;

    let panel = build_income_panel(rows, config)?;

    log_operation_complete(
        "built income panel with",
        &config.path,
        panel.len(),
        panel.dropped_values,
        Some(start.elapsed()),
    );
    Ok(panel)
}
