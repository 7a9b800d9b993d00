//! Per-run report

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::config::PipelineConfig;
use crate::models::{AlertLevel, IncomePanel, IncompleteJoin, RiskPanel, UnemploymentPanel};

/// Maximum number of RED alerts listed in a report
pub const MAX_REPORTED_ALERTS: usize = 20;

/// One RED alert as shown in the report
#[derive(Debug, Clone, PartialEq)]
pub struct AlertSummary {
    pub district: String,
    pub year: i32,
    pub irs: f64,
    pub irs_var_pct: Option<f64>,
}

/// Summary of a pipeline run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// When the report was built
    pub generated_at: DateTime<Local>,
    /// Income rows kept after collapsing duplicates
    pub income_rows: usize,
    /// Income rows dropped for a missing or invalid value
    pub income_dropped: usize,
    /// Income rows merged into another row of the same district and year
    pub income_collapsed: usize,
    /// Expected income panel size (districts x years)
    pub income_expected: usize,
    /// Unemployment files read
    pub unemployment_files: usize,
    /// Yearly unemployment records kept
    pub unemployment_rows: usize,
    /// Unemployment rows dropped for a non-numeric total
    pub unemployment_dropped: usize,
    /// Income rows excluded for lack of an unemployment year
    pub incomplete_joins: Vec<IncompleteJoin>,
    /// Rows of the final panel
    pub risk_rows: usize,
    /// Distinct districts in the final panel
    pub districts: usize,
    /// Distinct years in the final panel
    pub years: Vec<i32>,
    /// Total RED rows
    pub red_total: usize,
    /// First RED alerts, by year then variation descending
    pub red_alerts: Vec<AlertSummary>,
    /// Files written by the run
    pub artifacts: Vec<PathBuf>,
}

impl RunReport {
    /// Build the report from the three panels of a run
    #[must_use]
    pub fn from_panels(
        config: &PipelineConfig,
        income: &IncomePanel,
        unemployment: &UnemploymentPanel,
        risk: &RiskPanel,
    ) -> Self {
        let red = risk.red_alerts();
        let red_alerts = red
            .iter()
            .take(MAX_REPORTED_ALERTS)
            .map(|r| AlertSummary {
                district: r.district.clone(),
                year: r.year,
                irs: r.irs,
                irs_var_pct: r.irs_var_pct,
            })
            .collect();

        Self {
            generated_at: Local::now(),
            income_rows: income.len(),
            income_dropped: income.dropped_values,
            income_collapsed: income.collapsed_duplicates,
            income_expected: config.income.expected_districts * config.income.years.len(),
            unemployment_files: unemployment.files_read,
            unemployment_rows: unemployment.records.len(),
            unemployment_dropped: unemployment.dropped_values,
            incomplete_joins: risk.incomplete_joins.clone(),
            risk_rows: risk.len(),
            districts: risk.districts().len(),
            years: risk.years(),
            red_total: red.len(),
            red_alerts,
            artifacts: Vec::new(),
        }
    }

    /// Whether the income panel has the expected size
    #[must_use]
    pub const fn income_complete(&self) -> bool {
        self.income_rows == self.income_expected
    }

    /// Record the files written by the run
    #[must_use]
    pub fn with_artifacts(mut self, artifacts: Vec<PathBuf>) -> Self {
        self.artifacts = artifacts;
        self
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Run Report ({}):",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(
            f,
            "  Income: {} rows kept, {} dropped, {} duplicates collapsed (expected {}{})",
            self.income_rows,
            self.income_dropped,
            self.income_collapsed,
            self.income_expected,
            if self.income_complete() { "" } else { ", MISMATCH" }
        )?;
        writeln!(
            f,
            "  Unemployment: {} years kept from {} files, {} values dropped",
            self.unemployment_rows, self.unemployment_files, self.unemployment_dropped
        )?;
        writeln!(f, "  Incomplete Joins: {}", self.incomplete_joins.len())?;
        for join in &self.incomplete_joins {
            writeln!(f, "    - {join}")?;
        }
        let years = match (self.years.first(), self.years.last()) {
            (Some(first), Some(last)) => format!("{first}-{last}"),
            _ => "none".to_string(),
        };
        writeln!(
            f,
            "  Risk Panel: {} rows, {} districts, years {}",
            self.risk_rows, self.districts, years
        )?;
        writeln!(f, "  {} Alerts: {}", AlertLevel::Red, self.red_total)?;
        for alert in &self.red_alerts {
            let var = alert
                .irs_var_pct
                .map_or_else(|| "n/a".to_string(), |v| format!("{:+.1}%", v * 100.0));
            writeln!(
                f,
                "    - {} {}: IRS {:.3} ({var})",
                alert.district, alert.year, alert.irs
            )?;
        }
        if self.red_total > self.red_alerts.len() {
            writeln!(
                f,
                "    ... {} more",
                self.red_total - self.red_alerts.len()
            )?;
        }
        write!(f, "  Artifacts: {}", self.artifacts.len())?;
        for path in &self.artifacts {
            write!(f, "\n    - {}", path.display())?;
        }
        Ok(())
    }
}
