//! District income records
//!
//! Median income per consumption unit by district and year, and the
//! normalized risk derived from it.

/// Median income of one district in one year
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeRecord {
    /// District label as found in the source, e.g. `4109102 Sevilla distrito 02`
    pub district: String,
    /// Reference year
    pub year: i32,
    /// Median income per consumption unit (never negative)
    pub median_income: f64,
}

impl IncomeRecord {
    /// Create a new income record
    #[must_use]
    pub fn new(district: impl Into<String>, year: i32, median_income: f64) -> Self {
        Self {
            district: district.into(),
            year,
            median_income,
        }
    }
}

/// Income record with its min-max position in the panel
///
/// `income_risk = 1 - income_norm`, so a lower income means a higher risk.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeRiskRecord {
    pub district: String,
    pub year: i32,
    pub median_income: f64,
    /// Position of `median_income` between the panel minimum and maximum, in [0, 1]
    pub income_norm: f64,
    /// `1 - income_norm`, in [0, 1]
    pub income_risk: f64,
}

impl IncomeRiskRecord {
    /// Attach a normalized value to an income record
    #[must_use]
    pub fn from_record(record: IncomeRecord, income_norm: f64) -> Self {
        Self {
            district: record.district,
            year: record.year,
            median_income: record.median_income,
            income_norm,
            income_risk: 1.0 - income_norm,
        }
    }
}

/// Cleaned income panel, one record per (district, year), ordered by
/// district then year
#[derive(Debug, Clone, Default)]
pub struct IncomePanel {
    /// Panel records
    pub records: Vec<IncomeRiskRecord>,
    /// Selected rows discarded because their value was missing or invalid
    pub dropped_values: usize,
    /// Rows merged into another row of the same (district, year)
    pub collapsed_duplicates: usize,
}

impl IncomePanel {
    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the panel is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
