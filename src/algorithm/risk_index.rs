//! Social risk index computation
//!
//! Income risk is known per district and year, unemployment only per year
//! for the whole municipality. The join is therefore on year alone: every
//! district of a year shares that year's unemployment value.
//!
//! The previous-year comparison is ordinal. After sorting by district and
//! year, a record's predecessor is the district's nearest earlier year
//! present in the panel, which is not necessarily `year - 1` when a year is
//! missing.

use std::collections::BTreeMap;

use crate::config::RiskConfig;
use crate::error::{IrsError, Result};
use crate::models::{
    AlertLevel, IncomePanel, IncompleteJoin, RiskIndexRecord, RiskPanel, UnemploymentPanel,
};
use crate::utils::logging::log_warning;

/// One district-year with both index components available
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub district: String,
    pub year: i32,
    pub income_risk: f64,
    pub unemployment_norm: f64,
}

/// Result of the year join
#[derive(Debug, Default)]
pub struct JoinedPanel {
    /// Rows with both components
    pub rows: Vec<JoinedRow>,
    /// Every income row whose year had no unemployment value
    pub incomplete: Vec<IncompleteJoin>,
}

/// Left-join the income panel to the unemployment panel on year
///
/// Rows without an unemployment value for their year are excluded and
/// recorded as `IncompleteJoin`; the join itself never fails.
#[must_use]
pub fn join_on_year(income: &IncomePanel, unemployment: &UnemploymentPanel) -> JoinedPanel {
    let by_year: BTreeMap<i32, f64> = unemployment
        .records
        .iter()
        .map(|r| (r.year, r.unemployment_norm))
        .collect();

    let mut joined = JoinedPanel::default();
    for record in &income.records {
        match by_year.get(&record.year) {
            Some(&unemployment_norm) => joined.rows.push(JoinedRow {
                district: record.district.clone(),
                year: record.year,
                income_risk: record.income_risk,
                unemployment_norm,
            }),
            None => {
                let missing = IncompleteJoin::new(record.district.clone(), record.year);
                log::warn!("{}, row excluded", missing.to_error());
                joined.incomplete.push(missing);
            }
        }
    }
    joined
}

/// Weighted index of one joined row
#[must_use]
pub fn weighted_index(row: &JoinedRow, risk: &RiskConfig) -> f64 {
    risk.income_weight * row.income_risk + risk.unemployment_weight * row.unemployment_norm
}

/// Compute the index, the year-over-year variation and the alert level
///
/// Output is ordered by district, then year.
#[must_use]
pub fn score_rows(mut rows: Vec<JoinedRow>, risk: &RiskConfig) -> Vec<RiskIndexRecord> {
    rows.sort_by(|a, b| a.district.cmp(&b.district).then(a.year.cmp(&b.year)));

    let mut records: Vec<RiskIndexRecord> = Vec::with_capacity(rows.len());
    for row in rows {
        let irs = weighted_index(&row, risk);

        let irs_prev = records
            .last()
            .filter(|prev| prev.district == row.district)
            .map(|prev| prev.irs);

        let irs_var_pct = irs_prev.map(|prev| irs / prev - 1.0);
        if let Some(var) = irs_var_pct.filter(|v| !v.is_finite()) {
            log_warning(
                &format!(
                    "Non-finite IRS variation ({var}) for {} in {}: previous IRS is 0",
                    row.district, row.year
                ),
                None,
            );
        }

        records.push(RiskIndexRecord {
            district: row.district,
            year: row.year,
            irs,
            irs_prev,
            irs_var_pct,
            alert_level: AlertLevel::classify(irs_var_pct, risk.alert_threshold),
        });
    }
    records
}

/// Join both panels and score every district-year
///
/// # Errors
/// `NoData` when no income row could be joined.
pub fn build_risk_panel(
    income: &IncomePanel,
    unemployment: &UnemploymentPanel,
    risk: &RiskConfig,
) -> Result<RiskPanel> {
    let joined = join_on_year(income, unemployment);
    if joined.rows.is_empty() {
        return Err(IrsError::no_data(format!(
            "none of {} income rows matched an unemployment year",
            income.len()
        )));
    }

    let records = score_rows(joined.rows, risk);
    let panel = RiskPanel {
        records,
        incomplete_joins: joined.incomplete,
    };

    log::info!(
        "Risk panel: {} rows, {} districts, years {:?}, {} RED alerts, {} incomplete joins",
        panel.len(),
        panel.districts().len(),
        panel.years(),
        panel.red_alerts().len(),
        panel.incomplete_joins.len()
    );
    Ok(panel)
}
