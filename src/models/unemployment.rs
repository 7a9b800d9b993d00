//! Municipal unemployment records

/// Registered unemployment of the target municipality in one year
#[derive(Debug, Clone, PartialEq)]
pub struct UnemploymentRecord {
    /// Reference year
    pub year: i32,
    /// Mean of the monthly totals observed in the year
    pub unemployment_total: f64,
    /// Min-max position of `unemployment_total` in the panel, in [0, 1]
    pub unemployment_norm: f64,
}

/// Unemployment panel, one record per year in ascending order
#[derive(Debug, Clone, Default)]
pub struct UnemploymentPanel {
    /// Panel records
    pub records: Vec<UnemploymentRecord>,
    /// Matching rows discarded because the total was not numeric
    pub dropped_values: usize,
    /// Number of files read
    pub files_read: usize,
}

impl UnemploymentPanel {
    /// Normalized unemployment for a year
    #[must_use]
    pub fn norm_for_year(&self, year: i32) -> Option<f64> {
        self.records
            .iter()
            .find(|r| r.year == year)
            .map(|r| r.unemployment_norm)
    }

    /// Years present in the panel
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// Whether the panel is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
